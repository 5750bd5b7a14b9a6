//! Database column synchronization for enum-backed columns.
//!
//! Restricts each declared target column to the owning enum's current
//! case values. Introspection and execution go through the
//! `SchemaBackend` trait so the same pipeline runs against a live
//! connection, a dry run, or a test double.
//!
//! Safety characteristics:
//! - Table and column names are validated as SQL identifiers before any
//!   interpolation (invalid names are fatal config errors, never skips)
//! - Embedded quotes in case values are doubled
//! - Missing tables/columns are skipped silently; execution failures
//!   abort the run with already-applied targets preserved in the result

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EnumSyncError, EnumSyncResult};
use crate::registry::EnumCase;
use crate::scan::EnumDescriptor;

/// Connected-schema operations the synchronizer needs.
///
/// Implementations own their DDL dialect; the synchronizer hands them
/// the generic `ALTER TABLE … MODIFY COLUMN … ENUM(…)` statement and a
/// backend for an engine without inline enum columns is expected to
/// fail execution, which surfaces as the run's fatal error.
pub trait SchemaBackend {
    fn has_table(&mut self, table: &str) -> EnumSyncResult<bool>;
    fn has_column(&mut self, table: &str, column: &str) -> EnumSyncResult<bool>;
    fn execute_ddl(&mut self, statement: &str) -> EnumSyncResult<()>;
}

/// Pre-compiled SQL identifier pattern.
fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // Pattern is hardcoded and covered by the identifier tests below.
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Hardcoded regex pattern is valid")
    })
}

/// Validate a table or column name before interpolating it into DDL.
pub fn validate_identifier(name: &str) -> EnumSyncResult<()> {
    if identifier_regex().is_match(name) {
        Ok(())
    } else {
        Err(EnumSyncError::identifier(name))
    }
}

/// Render case values as a comma-separated single-quoted list, in
/// declaration order, with embedded quotes doubled.
pub fn enum_value_list(cases: &[EnumCase]) -> String {
    cases
        .iter()
        .map(|case| format!("'{}'", case.value.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the column alteration statement for one target.
///
/// Identifiers are validated and an empty case list is rejected; no SQL
/// engine accepts an empty enumeration, and skipping silently would
/// hide a host bug.
pub fn modify_enum_column_sql(
    table: &str,
    column: &str,
    cases: &[EnumCase],
) -> EnumSyncResult<String> {
    validate_identifier(table)?;
    validate_identifier(column)?;
    if cases.is_empty() {
        return Err(EnumSyncError::invalid_argument(format!(
            "cannot build an empty ENUM definition for {table}.{column}"
        )));
    }

    Ok(format!(
        "ALTER TABLE {table} MODIFY COLUMN {column} ENUM({})",
        enum_value_list(cases)
    ))
}

/// One successfully synchronized (or dry-run planned) column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedColumn {
    pub table: String,
    pub column: String,
    /// Statement that was (or would be) executed.
    pub statement: String,
}

/// Why a declared target was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTable,
    MissingColumn,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTable => write!(f, "table does not exist"),
            SkipReason::MissingColumn => write!(f, "column does not exist"),
        }
    }
}

/// A declared target skipped because its table or column is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub table: String,
    pub column: String,
    pub reason: SkipReason,
}

/// Aggregate result of one synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSyncOutcome {
    pub updated: Vec<SyncedColumn>,
    pub skipped: Vec<SkippedColumn>,
}

impl SchemaSyncOutcome {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.skipped.is_empty()
    }
}

/// A mid-run failure with the targets applied before it.
///
/// Synchronization is not transactional across targets; the outcome
/// carried here is how partial completion stays visible to the caller.
#[derive(Debug)]
pub struct SchemaSyncFailure {
    pub outcome: SchemaSyncOutcome,
    pub error: EnumSyncError,
}

impl fmt::Display for SchemaSyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schema sync failed after {} column(s) updated: {}",
            self.outcome.updated.len(),
            self.error
        )
    }
}

impl std::error::Error for SchemaSyncFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl SchemaSyncFailure {
    pub fn new(outcome: SchemaSyncOutcome, error: EnumSyncError) -> Box<Self> {
        Box::new(Self { outcome, error })
    }
}

/// Synchronize every declared target of the given descriptors.
///
/// Targets are processed in descriptor order, then declaration order.
/// In dry-run mode introspection still runs (so skips are real) but no
/// statement is executed.
pub fn sync_enum_columns(
    backend: &mut dyn SchemaBackend,
    descriptors: &[EnumDescriptor],
    dry_run: bool,
) -> Result<SchemaSyncOutcome, Box<SchemaSyncFailure>> {
    let mut outcome = SchemaSyncOutcome::default();

    for descriptor in descriptors {
        for target in &descriptor.tables {
            let statement =
                match modify_enum_column_sql(&target.table, &target.column, &descriptor.cases) {
                    Ok(statement) => statement,
                    Err(e) => return Err(SchemaSyncFailure::new(outcome, e)),
                };

            let table_exists = match backend.has_table(&target.table) {
                Ok(exists) => exists,
                Err(e) => return Err(SchemaSyncFailure::new(outcome, e)),
            };
            if !table_exists {
                tracing::debug!(table = %target.table, "table missing, skipping target");
                outcome.skipped.push(SkippedColumn {
                    table: target.table.clone(),
                    column: target.column.clone(),
                    reason: SkipReason::MissingTable,
                });
                continue;
            }

            let column_exists = match backend.has_column(&target.table, &target.column) {
                Ok(exists) => exists,
                Err(e) => return Err(SchemaSyncFailure::new(outcome, e)),
            };
            if !column_exists {
                tracing::debug!(
                    table = %target.table,
                    column = %target.column,
                    "column missing, skipping target"
                );
                outcome.skipped.push(SkippedColumn {
                    table: target.table.clone(),
                    column: target.column.clone(),
                    reason: SkipReason::MissingColumn,
                });
                continue;
            }

            if dry_run {
                tracing::debug!(
                    table = %target.table,
                    column = %target.column,
                    "dry run, statement not executed"
                );
            } else if let Err(e) = backend.execute_ddl(&statement) {
                return Err(SchemaSyncFailure::new(outcome, e));
            } else {
                tracing::info!(
                    enum_type = %descriptor.qualified_name,
                    table = %target.table,
                    column = %target.column,
                    "enum column updated"
                );
            }

            outcome.updated.push(SyncedColumn {
                table: target.table.clone(),
                column: target.column.clone(),
                statement,
            });
        }
    }

    Ok(outcome)
}
