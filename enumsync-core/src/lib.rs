//! enumsync-core: enum registry scanning, JS export, and schema synchronization
//!
//! This library keeps three downstream representations of a project's enums
//! aligned with the registered Rust definitions: a generated JavaScript
//! objects file, native `ENUM` database columns, and translation label keys.
//!
//! # Features
//!
//! - **Enum registry**: Declare enums once with cases, capabilities, and
//!   table column targets
//! - **Deterministic scanning**: Walk configured source directories in
//!   declared order, sorted within each directory
//! - **JS object export**: Regenerate a frozen-object JavaScript module
//!   as a full overwrite on every run
//! - **Schema synchronization**: Rebuild `ENUM` column definitions through
//!   a pluggable database backend, skipping absent tables and columns
//! - **Label resolution**: Map enum cases to translation keys with
//!   configurable prefix and namespace
//! - **Dry-run mode**: Render and introspect everything without writing
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use enumsync_core::prelude::*;
//!
//! let config = load_config(Path::new("enumsync.toml"))?.unwrap_or_default();
//! let summary = EnumSync::from_config(config)?
//!     .dry_run(false)
//!     .synchronize(&mut backend)?;
//!
//! for name in &summary.js.exported {
//!     println!("Exported enum: {}", name);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`registry`]: Enum registrations, capabilities, and column targets
//! - [`scan`]: Deterministic source discovery against the registry
//! - [`emit`]: JS object rendering and artifact writing
//! - [`schema`]: DDL construction and backend-driven column updates
//! - [`label`]: Translation key derivation and resolution
//! - [`traits`]: Opt-in traits for hand-written enum types
//! - [`sync`]: Fluent pipeline API tying the phases together
//! - [`config`]: TOML configuration loading
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `sqlite` (default): Enable the bundled SQLite backend
//! - `full`: Enable all optional features

// Core modules (always available)
pub mod config;
pub mod emit;
pub mod error;
pub mod label;
pub mod logging;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod scan;
pub mod schema;
pub mod sync;
pub mod traits;

// Feature-gated modules
#[cfg(feature = "sqlite")]
pub mod sqlite;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{EnumSyncError, EnumSyncResult, IoResultExt};

// Registry types
pub use registry::{
    Capability, CapabilitySet, EnumCase, EnumRegistration, EnumRegistry, TableColumnTarget,
};

// Configuration
pub use config::{load_config, EnumEntry, EnumLocation, LabelConfig, SyncConfig, DEFAULT_CONFIG_FILE};

// Scanning
pub use scan::{exportable_enums, scan, scan_all, syncable_enums, EnumDescriptor, EnumScanner};

// JS export
pub use emit::{render_enum_object, render_js_module, write_js_objects, write_rendered};

// Schema synchronization
pub use schema::{
    enum_value_list, modify_enum_column_sql, sync_enum_columns, validate_identifier,
    SchemaBackend, SchemaSyncFailure, SchemaSyncOutcome, SkipReason, SkippedColumn, SyncedColumn,
};

// Label resolution
pub use label::{label_key, LabelResolver};

// Trait surface
pub use traits::{EnumCases, EnumColumns, EnumLabels};

// Pipeline API
pub use sync::{synchronize, EnumSync, JsExportOutcome, SyncFailure, SyncSummary};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{print_failure_json, print_failure_plain, print_json, print_plain, print_schema_plain};

// Feature-gated re-exports
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;
