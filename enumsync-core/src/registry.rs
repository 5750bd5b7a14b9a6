//! Explicit enum registry with capability tags.
//!
//! Registrations replace runtime type introspection: a host application
//! (or a config file) registers each enum once with its qualified name,
//! its case name/value pairs, the capabilities it opts into, and any
//! table/column targets it keeps synchronized. The scanner resolves file
//! names against this registry and filters on the declared tags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{EnumSyncError, EnumSyncResult};

/// One enum case: declared name plus its backing value.
///
/// Values are always carried as strings; integer-backed enums register
/// their values in decimal string form and the emitter quotes them the
/// same way as string-backed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCase {
    pub name: String,
    pub value: String,
}

impl EnumCase {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Capabilities an enum registration can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Included in the generated JS objects file.
    JsExport,
    /// Declared table columns follow the case values.
    SchemaSync,
    /// Participates in label resolution.
    Labeled,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::JsExport => "js-export",
            Capability::SchemaSync => "schema-sync",
            Capability::Labeled => "labeled",
        };
        write!(f, "{name}")
    }
}

/// The set of capabilities carried by one registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    js_export: bool,
    schema_sync: bool,
    labeled: bool,
}

impl CapabilitySet {
    pub fn add(&mut self, capability: Capability) {
        match capability {
            Capability::JsExport => self.js_export = true,
            Capability::SchemaSync => self.schema_sync = true,
            Capability::Labeled => self.labeled = true,
        }
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.add(capability);
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::JsExport => self.js_export,
            Capability::SchemaSync => self.schema_sync,
            Capability::Labeled => self.labeled,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.js_export || self.schema_sync || self.labeled)
    }
}

/// A table column whose allowed values an enum keeps synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumnTarget {
    pub table: String,
    pub column: String,
}

impl TableColumnTarget {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for TableColumnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// One registered enum: qualified name, ordered cases, capability tags,
/// and declared table targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRegistration {
    pub qualified_name: String,
    pub cases: Vec<EnumCase>,
    pub capabilities: CapabilitySet,
    pub tables: Vec<TableColumnTarget>,
}

impl EnumRegistration {
    /// Start a registration for the given qualified name.
    ///
    /// The name must be non-empty; the segment after the last `::`
    /// becomes the short type name used in JS exports and label keys.
    pub fn new(qualified_name: impl Into<String>) -> EnumSyncResult<Self> {
        let qualified_name = qualified_name.into();
        if qualified_name.trim().is_empty() {
            return Err(EnumSyncError::registry(
                qualified_name,
                "registration name must be non-empty",
            ));
        }
        if qualified_name.ends_with("::") {
            return Err(EnumSyncError::registry(
                qualified_name,
                "registration name must not end with a namespace separator",
            ));
        }
        Ok(Self {
            qualified_name,
            cases: Vec::new(),
            capabilities: CapabilitySet::default(),
            tables: Vec::new(),
        })
    }

    /// Append a case in declaration order.
    pub fn case(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cases.push(EnumCase::new(name, value));
        self
    }

    /// Opt into a capability.
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities.add(capability);
        self
    }

    /// Declare a table column target (implies nothing about capabilities;
    /// schema sync still requires the `SchemaSync` tag).
    pub fn table(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.tables.push(TableColumnTarget::new(table, column));
        self
    }

    /// Short type name: the segment after the last `::`.
    pub fn short_name(&self) -> &str {
        match self.qualified_name.rfind("::") {
            Some(idx) => &self.qualified_name[idx + 2..],
            None => &self.qualified_name,
        }
    }
}

/// Lookup table from qualified type name to registration.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    entries: HashMap<String, EnumRegistration>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enum. Registering the same qualified name twice is an
    /// error; silent replacement would hide a host wiring bug.
    pub fn register(&mut self, registration: EnumRegistration) -> EnumSyncResult<()> {
        let name = registration.qualified_name.clone();
        if self.entries.contains_key(&name) {
            return Err(EnumSyncError::registry(name, "already registered"));
        }
        self.entries.insert(name, registration);
        Ok(())
    }

    /// Exact-name lookup. `None` means the candidate is not a registered
    /// type; scanners treat that as a routine skip.
    pub fn resolve(&self, qualified_name: &str) -> Option<&EnumRegistration> {
        self.entries.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered qualified names, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> EnumRegistration {
        EnumRegistration::new("app::enums::Status")
            .unwrap()
            .case("Active", "active")
            .case("Inactive", "inactive")
            .capability(Capability::JsExport)
            .capability(Capability::SchemaSync)
            .table("users", "status")
    }

    #[test]
    fn test_short_name() {
        assert_eq!(status().short_name(), "Status");
        let bare = EnumRegistration::new("Status").unwrap();
        assert_eq!(bare.short_name(), "Status");
    }

    #[test]
    fn test_capability_set() {
        let reg = status();
        assert!(reg.capabilities.contains(Capability::JsExport));
        assert!(reg.capabilities.contains(Capability::SchemaSync));
        assert!(!reg.capabilities.contains(Capability::Labeled));
        assert!(CapabilitySet::default().is_empty());
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = EnumRegistry::new();
        registry.register(status()).unwrap();

        let reg = registry.resolve("app::enums::Status").unwrap();
        assert_eq!(reg.cases[0].name, "Active");
        assert_eq!(reg.tables[0].table, "users");
        assert!(registry.resolve("app::enums::Missing").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = EnumRegistry::new();
        registry.register(status()).unwrap();
        let err = registry.register(status()).unwrap_err();
        assert!(matches!(err, EnumSyncError::Registry { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(EnumRegistration::new("  ").is_err());
        assert!(EnumRegistration::new("app::enums::").is_err());
    }

    #[test]
    fn test_capability_serde_names() {
        let parsed: Vec<Capability> =
            serde_json::from_str(r#"["js-export", "schema-sync", "labeled"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Capability::JsExport,
                Capability::SchemaSync,
                Capability::Labeled
            ]
        );
    }
}
