//! Configuration loading from enumsync.toml.
//!
//! The configuration mirrors what a host application would supply: where
//! enum source files live and what namespace prefix maps onto each
//! directory, where the generated JS objects file goes, label resolution
//! defaults, and the commands an outer orchestration layer runs after
//! migrations. Standalone processes can also declare enum registrations
//! directly in the file via `[[enums]]` entries.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{EnumSyncError, EnumSyncResult};
use crate::registry::{Capability, EnumCase, EnumRegistration, EnumRegistry, TableColumnTarget};

/// Default configuration file name, looked up relative to the working
/// directory unless a path is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "enumsync.toml";

/// Main configuration structure for enumsync.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Scanned directories in declared order, each with the namespace
    /// prefix that turns a file stem into a qualified type name.
    #[serde(default = "default_locations")]
    pub locations: Vec<EnumLocation>,
    /// Output path for the generated JS objects file.
    #[serde(default = "default_js_objects_file")]
    pub js_objects_file: PathBuf,
    /// Label resolution defaults.
    #[serde(default)]
    pub label: LabelConfig,
    /// Command names an outer orchestration layer invokes after its
    /// migrations complete. Carried for that layer; not interpreted here.
    #[serde(default = "default_post_migrate")]
    pub post_migrate: Vec<String>,
    /// Declarative enum registrations for standalone processes.
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
}

/// One scanned directory and its namespace prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumLocation {
    pub directory: PathBuf,
    pub namespace: String,
}

/// Defaults for label key construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelConfig {
    /// Key prefix, normalized to end with a single `.` when non-empty.
    pub prefix: Option<String>,
    /// Key namespace, normalized to end with `::` when non-empty.
    pub namespace: Option<String>,
}

/// A declarative enum registration. Library consumers register through
/// `EnumRegistry` directly; this form exists for config-driven processes.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumEntry {
    /// Fully qualified type name the scanner resolves against.
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub cases: Vec<EnumCase>,
    #[serde(default)]
    pub tables: Vec<TableColumnTarget>,
}

fn default_locations() -> Vec<EnumLocation> {
    vec![EnumLocation {
        directory: PathBuf::from("app/enums"),
        namespace: "app::enums::".to_string(),
    }]
}

fn default_js_objects_file() -> PathBuf {
    PathBuf::from("resources/js/enums.js")
}

fn default_post_migrate() -> Vec<String> {
    vec!["migrate".to_string()]
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            js_objects_file: default_js_objects_file(),
            label: LabelConfig::default(),
            post_migrate: default_post_migrate(),
            enums: Vec::new(),
        }
    }
}

impl SyncConfig {
    /// Build an `EnumRegistry` from the declarative `[[enums]]` entries.
    ///
    /// Duplicate qualified names and empty names are registration errors.
    pub fn build_registry(&self) -> EnumSyncResult<EnumRegistry> {
        let mut registry = EnumRegistry::new();
        for entry in &self.enums {
            let mut registration = EnumRegistration::new(&entry.name)?;
            for case in &entry.cases {
                registration = registration.case(&case.name, &case.value);
            }
            for capability in &entry.capabilities {
                registration = registration.capability(*capability);
            }
            for target in &entry.tables {
                registration = registration.table(&target.table, &target.column);
            }
            registry.register(registration)?;
        }
        Ok(registry)
    }
}

/// Loads configuration from the given path if it exists.
///
/// A missing file is not an error; callers fall back to
/// `SyncConfig::default()`. A file that exists but fails to parse is a
/// fatal config error.
pub fn load_config(path: &Path) -> EnumSyncResult<Option<SyncConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| EnumSyncError::io(path, e))?;
    let cfg = toml::from_str(&content)
        .map_err(|e| EnumSyncError::config(path, format!("Invalid {}: {e}", DEFAULT_CONFIG_FILE)))?;
    Ok(Some(cfg))
}
