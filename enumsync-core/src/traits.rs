//! Host-facing enum traits.
//!
//! Applications implement these on their own enums to get collection
//! accessors, label resolution, and registration seeding without
//! repeating case lists by hand. The pipeline itself never requires the
//! traits; `EnumRegistration` can always be built directly.

use indexmap::IndexMap;

use crate::error::{EnumSyncError, EnumSyncResult};
use crate::label::LabelResolver;
use crate::registry::{Capability, EnumCase, EnumRegistration, TableColumnTarget};

/// Case-level introspection for an application enum.
pub trait EnumCases {
    /// Short type name as it appears in JS exports and label keys.
    fn short_name() -> &'static str;

    /// Cases in declaration order.
    fn cases() -> Vec<EnumCase>;

    /// Case names in declaration order.
    fn keys() -> Vec<String> {
        Self::cases().into_iter().map(|case| case.name).collect()
    }

    /// Case values in declaration order.
    fn values() -> Vec<String> {
        Self::cases().into_iter().map(|case| case.value).collect()
    }

    /// Case name to value, preserving declaration order.
    fn key_value_pairs() -> IndexMap<String, String> {
        Self::cases()
            .into_iter()
            .map(|case| (case.name, case.value))
            .collect()
    }
}

/// Label resolution for an application enum.
pub trait EnumLabels: EnumCases {
    /// Declared name of this case.
    fn case_name(&self) -> &str;

    /// Resolve this case's label using configured defaults.
    fn label(&self, resolver: &LabelResolver<'_>) -> String {
        resolver.resolve(self.case_name(), Self::short_name())
    }

    /// Resolve this case's label with explicit prefix/namespace overrides.
    fn label_with(
        &self,
        resolver: &LabelResolver<'_>,
        prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> String {
        resolver.resolve_with(self.case_name(), Self::short_name(), prefix, namespace)
    }

    /// Resolve labels for every case, preserving declaration order.
    fn labels(resolver: &LabelResolver<'_>) -> IndexMap<String, String>
    where
        Self: Sized,
    {
        resolver.resolve_all(Self::short_name(), &Self::cases())
    }
}

/// Table targets for an application enum that keeps columns in sync.
pub trait EnumColumns: EnumCases {
    /// Table columns whose allowed values follow the case values.
    fn tables() -> Vec<TableColumnTarget>;
}

impl EnumRegistration {
    /// Seed a registration from an `EnumCases` implementation.
    ///
    /// The qualified name's short segment must match `T::short_name()`;
    /// a mismatch would make exports and label keys disagree, so it is
    /// rejected here rather than surfacing later as wrong output.
    pub fn for_type<T: EnumCases>(qualified_name: impl Into<String>) -> EnumSyncResult<Self> {
        let mut registration = Self::new(qualified_name)?;
        if registration.short_name() != T::short_name() {
            return Err(EnumSyncError::registry(
                registration.qualified_name,
                format!(
                    "qualified name does not end in type name {}",
                    T::short_name()
                ),
            ));
        }
        for case in T::cases() {
            registration = registration.case(case.name, case.value);
        }
        Ok(registration)
    }

    /// Seed a schema-syncing registration from an `EnumColumns`
    /// implementation: cases, declared tables, and the schema-sync tag.
    pub fn for_columns<T: EnumColumns>(qualified_name: impl Into<String>) -> EnumSyncResult<Self> {
        let mut registration =
            Self::for_type::<T>(qualified_name)?.capability(Capability::SchemaSync);
        for target in T::tables() {
            registration = registration.table(target.table, target.column);
        }
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;

    enum Status {
        Active,
        Inactive,
    }

    impl EnumCases for Status {
        fn short_name() -> &'static str {
            "Status"
        }

        fn cases() -> Vec<EnumCase> {
            vec![
                EnumCase::new("Active", "active"),
                EnumCase::new("Inactive", "inactive"),
            ]
        }
    }

    impl EnumLabels for Status {
        fn case_name(&self) -> &str {
            match self {
                Status::Active => "Active",
                Status::Inactive => "Inactive",
            }
        }
    }

    impl EnumColumns for Status {
        fn tables() -> Vec<TableColumnTarget> {
            vec![TableColumnTarget::new("users", "status")]
        }
    }

    #[test]
    fn test_collection_accessors() {
        assert_eq!(Status::keys(), vec!["Active", "Inactive"]);
        assert_eq!(Status::values(), vec!["active", "inactive"]);

        let pairs = Status::key_value_pairs();
        let keys: Vec<&String> = pairs.keys().collect();
        assert_eq!(keys, vec!["Active", "Inactive"]);
        assert_eq!(pairs["Active"], "active");
    }

    #[test]
    fn test_label_through_resolver() {
        let config = LabelConfig {
            prefix: Some("enums".to_string()),
            namespace: None,
        };
        let identity = |key: &str| key.to_string();
        let resolver = LabelResolver::new(&config, &identity);

        assert_eq!(Status::Active.label(&resolver), "enums.Status.Active");
        assert_eq!(
            Status::Inactive.label_with(&resolver, None, Some("app")),
            "app::enums.Status.Inactive"
        );

        let labels = Status::labels(&resolver);
        assert_eq!(labels["Inactive"], "enums.Status.Inactive");
    }

    #[test]
    fn test_registration_seeding() {
        let registration = EnumRegistration::for_columns::<Status>("app::enums::Status").unwrap();
        assert_eq!(registration.short_name(), "Status");
        assert_eq!(registration.cases.len(), 2);
        assert_eq!(registration.tables.len(), 1);
        assert!(registration.capabilities.contains(Capability::SchemaSync));
        assert!(!registration.capabilities.contains(Capability::JsExport));
    }

    #[test]
    fn test_registration_name_mismatch_rejected() {
        let err = EnumRegistration::for_type::<Status>("app::enums::Role").unwrap_err();
        assert!(matches!(err, EnumSyncError::Registry { .. }));
    }
}
