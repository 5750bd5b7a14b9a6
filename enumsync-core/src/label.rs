//! Localization key derivation for enum cases.
//!
//! A label key is built from an optional namespace, an optional prefix,
//! the enum's short type name, and the case name, then passed through an
//! injected translation lookup. The lookup owns missing-key behavior;
//! returning the key unchanged is the conventional fallback.

use indexmap::IndexMap;

use crate::config::LabelConfig;
use crate::registry::EnumCase;

/// Build a label key from already-chosen prefix/namespace values.
///
/// Normalization: a non-empty prefix has trailing dots trimmed and a
/// single `.` appended; a non-empty namespace gets `::` appended unless
/// already present. Empty or absent parts contribute nothing.
pub fn label_key(
    case_name: &str,
    type_short_name: &str,
    prefix: Option<&str>,
    namespace: Option<&str>,
) -> String {
    let mut key = String::new();

    if let Some(ns) = namespace {
        if !ns.is_empty() {
            key.push_str(ns);
            if !ns.ends_with("::") {
                key.push_str("::");
            }
        }
    }

    if let Some(prefix) = prefix {
        if !prefix.is_empty() {
            key.push_str(prefix.trim_end_matches('.'));
            key.push('.');
        }
    }

    key.push_str(type_short_name);
    key.push('.');
    key.push_str(case_name);
    key
}

/// Resolves enum case labels through an injected translation lookup,
/// falling back to configured prefix/namespace defaults.
pub struct LabelResolver<'a> {
    config: &'a LabelConfig,
    translate: &'a dyn Fn(&str) -> String,
}

impl<'a> LabelResolver<'a> {
    pub fn new(config: &'a LabelConfig, translate: &'a dyn Fn(&str) -> String) -> Self {
        Self { config, translate }
    }

    /// The lookup key for one case, with explicit overrides taking
    /// precedence over configured defaults. An empty override counts as
    /// absent, matching the original package's falsy-fallback behavior.
    pub fn key(
        &self,
        case_name: &str,
        type_short_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> String {
        let prefix = match prefix {
            Some(p) if !p.is_empty() => Some(p),
            _ => self.config.prefix.as_deref(),
        };
        let namespace = match namespace {
            Some(ns) if !ns.is_empty() => Some(ns),
            _ => self.config.namespace.as_deref(),
        };
        label_key(case_name, type_short_name, prefix, namespace)
    }

    /// Resolve one case label using configured defaults.
    pub fn resolve(&self, case_name: &str, type_short_name: &str) -> String {
        self.resolve_with(case_name, type_short_name, None, None)
    }

    /// Resolve one case label with explicit prefix/namespace overrides.
    pub fn resolve_with(
        &self,
        case_name: &str,
        type_short_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> String {
        let key = self.key(case_name, type_short_name, prefix, namespace);
        (self.translate)(&key)
    }

    /// Resolve every case of a type, preserving declaration order.
    pub fn resolve_all(
        &self,
        type_short_name: &str,
        cases: &[EnumCase],
    ) -> IndexMap<String, String> {
        cases
            .iter()
            .map(|case| {
                (
                    case.name.clone(),
                    self.resolve(&case.name, type_short_name),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(key: &str) -> String {
        key.to_string()
    }

    #[test]
    fn test_key_with_prefix_default() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: None,
        };
        let resolver = LabelResolver::new(&config, &identity);
        assert_eq!(resolver.resolve("Active", "Status"), "enums.Status.Active");
    }

    #[test]
    fn test_key_with_namespace_default() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: Some("app".to_string()),
        };
        let resolver = LabelResolver::new(&config, &identity);
        assert_eq!(
            resolver.resolve("Active", "Status"),
            "app::enums.Status.Active"
        );
    }

    #[test]
    fn test_bare_key_without_defaults() {
        let config = LabelConfig::default();
        let resolver = LabelResolver::new(&config, &identity);
        assert_eq!(resolver.resolve("Active", "Status"), "Status.Active");
    }

    #[test]
    fn test_explicit_overrides_win() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: Some("app".to_string()),
        };
        let resolver = LabelResolver::new(&config, &identity);
        assert_eq!(
            resolver.resolve_with("Active", "Status", Some("states"), Some("admin")),
            "admin::states.Status.Active"
        );
    }

    #[test]
    fn test_empty_override_falls_back() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: None,
        };
        let resolver = LabelResolver::new(&config, &identity);
        assert_eq!(
            resolver.resolve_with("Active", "Status", Some(""), None),
            "enums.Status.Active"
        );
    }

    #[test]
    fn test_prefix_trailing_dots_trimmed() {
        assert_eq!(
            label_key("Active", "Status", Some("enums..."), None),
            "enums.Status.Active"
        );
    }

    #[test]
    fn test_namespace_separator_not_doubled() {
        assert_eq!(
            label_key("Active", "Status", Some("enums"), Some("app::")),
            "app::enums.Status.Active"
        );
    }

    #[test]
    fn test_translation_lookup_applied() {
        let config = LabelConfig::default();
        let translate = |key: &str| {
            if key == "Status.Active" {
                "Aktiv".to_string()
            } else {
                key.to_string()
            }
        };
        let resolver = LabelResolver::new(&config, &translate);
        assert_eq!(resolver.resolve("Active", "Status"), "Aktiv");
        assert_eq!(resolver.resolve("Inactive", "Status"), "Status.Inactive");
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: None,
        };
        let resolver = LabelResolver::new(&config, &identity);
        let cases = vec![
            EnumCase::new("Pending", "pending"),
            EnumCase::new("Active", "active"),
            EnumCase::new("Closed", "closed"),
        ];
        let labels = resolver.resolve_all("Status", &cases);
        let keys: Vec<&String> = labels.keys().collect();
        assert_eq!(keys, vec!["Pending", "Active", "Closed"]);
        assert_eq!(labels["Active"], "enums.Status.Active");
    }
}
