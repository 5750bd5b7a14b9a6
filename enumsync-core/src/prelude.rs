//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use enumsync_core::prelude::*;
//! ```
//!
//! This provides the most commonly needed types for enum synchronization
//! without polluting the namespace with rarely-used items.

// Core pipeline types
pub use crate::error::{EnumSyncError, EnumSyncResult};
pub use crate::registry::{
    Capability, EnumCase, EnumRegistration, EnumRegistry, TableColumnTarget,
};

// Enum discovery
pub use crate::scan::{scan, scan_all, EnumDescriptor};

// JS object export
pub use crate::emit::{render_js_module, write_js_objects};

// Schema synchronization
pub use crate::schema::{sync_enum_columns, SchemaBackend, SchemaSyncOutcome};

// Label resolution
pub use crate::label::{label_key, LabelResolver};

// Trait surface for hand-written enum types
pub use crate::traits::{EnumCases, EnumColumns, EnumLabels};

// Configuration
pub use crate::config::{load_config, SyncConfig};

// Pipeline API
pub use crate::sync::{synchronize, EnumSync, SyncSummary};

// SQLite backend
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteBackend;
