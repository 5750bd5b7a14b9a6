//! SQLite-backed schema introspection and DDL execution.
//!
//! SQLite has no inline ENUM column type, so rewriting an enum column
//! against it fails at execution time with the engine's own error (the
//! run's fatal path). What this backend does provide is real
//! introspection: skip filtering, dry runs, and script generation all
//! work against an actual database file, and integration tests get a
//! full in-process `SchemaBackend`.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::{EnumSyncError, EnumSyncResult};
use crate::schema::SchemaBackend;

/// `SchemaBackend` over a SQLite database.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> EnumSyncResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| query_error(&format!("failed to open {}", path.display()), e))?;
        Ok(Self { conn })
    }

    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> EnumSyncResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| query_error("failed to open in-memory database", e))?;
        Ok(Self { conn })
    }
}

fn query_error(context: &str, err: rusqlite::Error) -> EnumSyncError {
    EnumSyncError::Schema {
        message: format!("{context}: {err}"),
        statement: None,
        source: Some(Box::new(err)),
    }
}

impl SchemaBackend for SqliteBackend {
    fn has_table(&mut self, table: &str) -> EnumSyncResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .map_err(|e| query_error("failed to prepare table lookup", e))?;
        stmt.exists(params![table])
            .map_err(|e| query_error("failed to check table existence", e))
    }

    fn has_column(&mut self, table: &str, column: &str) -> EnumSyncResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2")
            .map_err(|e| query_error("failed to prepare column lookup", e))?;
        stmt.exists(params![table, column])
            .map_err(|e| query_error("failed to check column existence", e))
    }

    fn execute_ddl(&mut self, statement: &str) -> EnumSyncResult<()> {
        self.conn
            .execute_batch(statement)
            .map_err(|e| EnumSyncError::schema_exec(statement, e))
    }
}
