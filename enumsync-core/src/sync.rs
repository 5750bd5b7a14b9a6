//! Orchestration API for the synchronization pipeline.
//!
//! Provides a fluent interface mirroring how external triggers drive the
//! tool (a console command, or a host's post-migration step):
//!
//! ```rust,ignore
//! use enumsync_core::prelude::*;
//!
//! let summary = EnumSync::new(config, registry)
//!     .dry_run(false)
//!     .synchronize(&mut backend)?;
//!
//! println!("{} column(s) updated", summary.schema.updated.len());
//! ```
//!
//! The pipeline runs the JS export first, then schema synchronization,
//! exactly once per invocation, scanning fresh state each time.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SyncConfig;
use crate::emit;
use crate::error::{EnumSyncError, EnumSyncResult};
use crate::registry::EnumRegistry;
use crate::scan;
use crate::schema::{self, SchemaBackend, SchemaSyncFailure, SchemaSyncOutcome};

/// Configured pipeline over one config and one registry.
#[derive(Debug, Clone)]
pub struct EnumSync {
    /// Threaded configuration (never ambient state)
    config: SyncConfig,

    /// Registered enums the scanner resolves against
    registry: EnumRegistry,

    /// Dry-run mode (introspect and render, touch nothing)
    dry_run: bool,

    /// JS output path override
    js_file: Option<PathBuf>,
}

impl EnumSync {
    /// Create a pipeline from explicit parts.
    pub fn new(config: SyncConfig, registry: EnumRegistry) -> Self {
        Self {
            config,
            registry,
            dry_run: false,
            js_file: None,
        }
    }

    /// Create a pipeline whose registry comes from the config's
    /// declarative `[[enums]]` entries.
    pub fn from_config(config: SyncConfig) -> EnumSyncResult<Self> {
        let registry = config.build_registry()?;
        Ok(Self::new(config, registry))
    }

    /// Enable dry-run mode (no file writes, no DDL execution).
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Override the configured JS output path.
    pub fn js_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.js_file = Some(path.into());
        self
    }

    fn js_output_path(&self) -> &Path {
        self.js_file
            .as_deref()
            .unwrap_or(&self.config.js_objects_file)
    }

    /// Regenerate the JS objects file from currently discoverable enums.
    pub fn export_js(&self) -> EnumSyncResult<JsExportOutcome> {
        // 1. Scan for exportable enums
        let descriptors = scan::exportable_enums(&self.config.locations, &self.registry)?;
        let exported: Vec<String> = descriptors
            .iter()
            .map(|d| d.short_name.clone())
            .collect();

        // 2. Render the complete artifact
        let content = emit::render_js_module(&descriptors);

        // 3. Overwrite the output file (unless dry running or empty)
        let file = if self.dry_run {
            None
        } else {
            emit::write_rendered(&content, self.js_output_path())?
        };

        Ok(JsExportOutcome {
            file,
            exported,
            content,
        })
    }

    /// Synchronize declared enum columns through the given backend.
    pub fn sync_schema(
        &self,
        backend: &mut dyn SchemaBackend,
    ) -> Result<SchemaSyncOutcome, Box<SchemaSyncFailure>> {
        let descriptors = scan::syncable_enums(&self.config.locations, &self.registry)
            .map_err(|e| SchemaSyncFailure::new(SchemaSyncOutcome::default(), e))?;
        schema::sync_enum_columns(backend, &descriptors, self.dry_run)
    }

    /// Run the whole pipeline: JS export, then schema synchronization.
    ///
    /// On failure, whatever completed stays visible in the returned
    /// `SyncFailure` (no rollback is ever attempted).
    pub fn synchronize(
        &self,
        backend: &mut dyn SchemaBackend,
    ) -> Result<SyncSummary, Box<SyncFailure>> {
        let js = match self.export_js() {
            Ok(js) => js,
            Err(error) => {
                return Err(Box::new(SyncFailure {
                    js: None,
                    schema: SchemaSyncOutcome::default(),
                    error,
                }))
            }
        };

        match self.sync_schema(backend) {
            Ok(schema) => Ok(SyncSummary { js, schema }),
            Err(failure) => Err(Box::new(SyncFailure {
                js: Some(js),
                schema: failure.outcome,
                error: failure.error,
            })),
        }
    }
}

/// Single entry point for external orchestration (a post-migration hook
/// or equivalent): build the registry from config and run everything.
pub fn synchronize(
    config: SyncConfig,
    backend: &mut dyn SchemaBackend,
) -> Result<SyncSummary, Box<SyncFailure>> {
    let pipeline = EnumSync::from_config(config).map_err(|error| {
        Box::new(SyncFailure {
            js: None,
            schema: SchemaSyncOutcome::default(),
            error,
        })
    })?;
    pipeline.synchronize(backend)
}

/// Result of one JS export phase.
#[derive(Debug, Clone, Serialize)]
pub struct JsExportOutcome {
    /// Written file, `None` when nothing was written (empty output or
    /// dry run)
    pub file: Option<PathBuf>,

    /// Short names of exported enums, in scanner order
    pub exported: Vec<String>,

    /// The rendered artifact (empty when no enums qualified)
    pub content: String,
}

/// Result of one full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub js: JsExportOutcome,
    pub schema: SchemaSyncOutcome,
}

/// A pipeline failure with everything that completed before it.
#[derive(Debug)]
pub struct SyncFailure {
    /// JS phase outcome, if that phase completed
    pub js: Option<JsExportOutcome>,

    /// Columns applied before the failure
    pub schema: SchemaSyncOutcome,

    pub error: EnumSyncError,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "synchronization failed after {} column(s) updated: {}",
            self.schema.updated.len(),
            self.error
        )
    }
}

impl std::error::Error for SyncFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
