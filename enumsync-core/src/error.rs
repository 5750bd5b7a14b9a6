//! Typed error handling for enumsync.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where.
//!
//! Skip conditions (missing directory, unresolved type name, missing
//! capability, missing table or column, empty emitter output) are not
//! errors and never construct a value of this type. Everything that does
//! reach this type aborts the remaining work of the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for enumsync operations.
///
/// This provides typed errors that library consumers can match on,
/// unlike opaque `anyhow::Error` types.
#[derive(Error, Debug)]
pub enum EnumSyncError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Enum registry errors (duplicate or malformed registrations)
    #[error("Registry error for {name}: {message}")]
    Registry { name: String, message: String },

    /// A declared table or column name is not a valid SQL identifier
    #[error("Invalid SQL identifier: {name}")]
    Identifier { name: String },

    /// Schema backend failure while introspecting or executing DDL
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        /// Statement being executed when the failure occurred, if any
        statement: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EnumSyncError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a registry error.
    pub fn registry(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registry {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-identifier error.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// Create a schema error without an underlying cause.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            statement: None,
            source: None,
        }
    }

    /// Create a schema error carrying the failed statement and its cause.
    pub fn schema_exec(
        statement: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Schema {
            message: err.to_string(),
            statement: Some(statement.into()),
            source: Some(Box::new(err)),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get the DDL statement associated with this error, if any.
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::Schema { statement, .. } => statement.as_deref(),
            _ => None,
        }
    }
}

/// Convenience type alias for enumsync results.
pub type EnumSyncResult<T> = Result<T, EnumSyncError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> EnumSyncResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> EnumSyncResult<T> {
        self.map_err(|e| EnumSyncError::io(path, e))
    }
}
