//! enumsync CLI - keeps JS objects and database enum columns in sync.
//!
//! Features:
//! - Declarative enum registration through `enumsync.toml`
//! - Full-overwrite JS objects export
//! - Schema synchronization against a SQLite database
//! - Dry-run mode and SQL script output
//! - Plain-text or JSON summaries

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use enumsync_core::{
    init_structured_logging, load_config, print_failure_json, print_failure_plain, print_json,
    print_plain, print_schema_plain, EnumSync, SchemaSyncOutcome, SqliteBackend, SyncConfig,
    DEFAULT_CONFIG_FILE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sync enum definitions to JS objects and database columns")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Export the JS objects file only
    #[arg(long)]
    js: bool,

    /// Synchronize declared enum columns only
    #[arg(long)]
    migrate: bool,

    /// SQLite database file used for schema synchronization
    #[arg(long, value_name = "FILE")]
    database: Option<String>,

    /// Show what would be written and executed without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Write the planned DDL statements to a SQL script file
    #[arg(long, value_name = "FILE")]
    sql_file: Option<String>,

    /// Write the JS objects to a specified file instead of the configured path
    #[arg(long, value_name = "FILE")]
    js_file: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(long)]
    verbose: bool,
}

/// Security: validates `--sql-file` and `--js-file` before anything is
/// written through them.
///
/// Rejected: absolute paths, `..` components, null bytes, and paths
/// pointing at something that exists but is not a regular file.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    // Security: null bytes (path injection)
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes: {:?}", path));
    }

    let p = PathBuf::from(path);

    // Security: artifacts stay relative to the working directory
    if p.is_absolute() {
        return Err(anyhow!("Output path must be relative: {}", path));
    }

    // Security: no parent-directory traversal
    if p.components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(anyhow!("Path traversal (..) not allowed: {}", path));
    }

    // Never silently overwrite a directory or other non-file
    if p.exists() && !p.is_file() {
        return Err(anyhow!(
            "Output path exists and is not a regular file: {}",
            path
        ));
    }

    Ok(p)
}

/// Opens the SQLite backend named by `--database`.
fn open_backend(database: Option<&str>) -> Result<SqliteBackend> {
    let db = database.ok_or_else(|| {
        anyhow!("--database <FILE> is required for schema synchronization (use --js for export only)")
    })?;
    let backend = SqliteBackend::open(Path::new(db))
        .with_context(|| format!("Failed to open database: {}", db))?;
    Ok(backend)
}

/// Writes the planned or executed DDL statements to a SQL script file.
fn write_sql_script(outcome: &SchemaSyncOutcome, path: &Path) -> Result<()> {
    let mut script = String::new();
    for col in &outcome.updated {
        script.push_str(&col.statement);
        script.push_str(";\n");
    }
    fs::write(path, &script)
        .with_context(|| format!("Failed to write SQL script to {}", path.display()))?;
    eprintln!("SQL script saved to: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Global panic guard
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] enumsync internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    let cli = Cli::parse();

    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug");
    }
    init_structured_logging();

    // 1. Load configuration (missing file falls back to built-in defaults)
    let config_path = Path::new(&cli.config);
    let config = match load_config(config_path) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => SyncConfig::default(),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };

    // 2. Validate output path overrides before any side effects
    let sql_file = match cli.sql_file.as_deref() {
        Some(path) => Some(
            validate_output_path(path).with_context(|| format!("Invalid output path: {}", path))?,
        ),
        None => None,
    };
    let js_file = match cli.js_file.as_deref() {
        Some(path) => Some(
            validate_output_path(path).with_context(|| format!("Invalid output path: {}", path))?,
        ),
        None => None,
    };

    // 3. Build the pipeline, registering enums declared in the config
    let mut pipeline = match EnumSync::from_config(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };
    pipeline = pipeline.dry_run(cli.dry_run);
    if let Some(path) = js_file {
        pipeline = pipeline.js_file(path);
    }

    // 4. JS export only
    if cli.js && !cli.migrate {
        if sql_file.is_some() {
            eprintln!("[WARN] --sql-file has no effect with --js");
        }

        let outcome = match pipeline.export_js() {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                std::process::exit(1);
            }
        };

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else if let Some(ref path) = outcome.file {
            println!("JS objects written to: {}", path.display());
            for name in &outcome.exported {
                println!("- {}", name);
            }
        } else if outcome.exported.is_empty() {
            println!("No exportable enums found.");
        } else {
            println!("[DRY-RUN] Would export {} enum(s):", outcome.exported.len());
            println!("{}", outcome.content);
        }

        std::process::exit(0);
    }

    // 5. Schema synchronization only
    if cli.migrate && !cli.js {
        let mut backend = open_backend(cli.database.as_deref())?;

        match pipeline.sync_schema(&mut backend) {
            Ok(outcome) => {
                if let Some(ref path) = sql_file {
                    write_sql_script(&outcome, path)?;
                }
                if cli.json {
                    let json_output = serde_json::json!({
                        "updated": outcome.updated,
                        "skipped": outcome.skipped,
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                } else {
                    print_schema_plain(&outcome);
                }
                std::process::exit(0);
            }
            Err(failure) => {
                // Applied statements stay auditable even on failure
                if let Some(ref path) = sql_file {
                    write_sql_script(&failure.outcome, path).ok();
                }
                eprintln!("[ERROR] {}", failure);
                if !failure.outcome.updated.is_empty() {
                    print_schema_plain(&failure.outcome);
                }
                std::process::exit(1);
            }
        }
    }

    // 6. Default: full pipeline (JS export, then schema synchronization)
    let mut backend = open_backend(cli.database.as_deref())?;

    match pipeline.synchronize(&mut backend) {
        Ok(summary) => {
            if let Some(ref path) = sql_file {
                write_sql_script(&summary.schema, path)?;
            }
            if cli.json {
                print_json(&summary);
            } else {
                print_plain(&summary);
            }
            std::process::exit(0);
        }
        Err(failure) => {
            if let Some(ref path) = sql_file {
                write_sql_script(&failure.schema, path).ok();
            }
            if cli.json {
                print_failure_json(&failure);
            } else {
                print_failure_plain(&failure);
            }
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumsync_core::{SchemaBackend, SkipReason, SkippedColumn, SyncedColumn};
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("enumsync_cli_test")
            .join(format!("{}_{}", name, id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    // --- validate_output_path TESTS ---

    #[test]
    fn test_validate_output_path_accepts_relative() {
        let result = validate_output_path("out/enums.sql");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), PathBuf::from("out/enums.sql"));
    }

    #[test]
    fn test_validate_output_path_rejects_absolute() {
        assert!(validate_output_path("/etc/passwd").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_traversal() {
        assert!(validate_output_path("../enums.sql").is_err());
        assert!(validate_output_path("out/../../enums.sql").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_null_bytes() {
        assert!(validate_output_path("enums\0.sql").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_directory() {
        // Test binaries run with the package directory as cwd, where src/ exists
        assert!(validate_output_path("src").is_err());
    }

    // --- write_sql_script TESTS ---

    #[test]
    fn test_write_sql_script_terminates_statements() {
        let temp_dir = create_temp_dir("sql_script");
        let path = temp_dir.join("enums.sql");

        let outcome = SchemaSyncOutcome {
            updated: vec![
                SyncedColumn {
                    table: "users".to_string(),
                    column: "status".to_string(),
                    statement: "ALTER TABLE users MODIFY COLUMN status ENUM('a','b')"
                        .to_string(),
                },
                SyncedColumn {
                    table: "orders".to_string(),
                    column: "status".to_string(),
                    statement: "ALTER TABLE orders MODIFY COLUMN status ENUM('a','b')"
                        .to_string(),
                },
            ],
            skipped: vec![SkippedColumn {
                table: "audits".to_string(),
                column: "status".to_string(),
                reason: SkipReason::MissingTable,
            }],
        };

        write_sql_script(&outcome, &path).unwrap();
        let script = fs::read_to_string(&path).unwrap();
        assert_eq!(
            script,
            "ALTER TABLE users MODIFY COLUMN status ENUM('a','b');\n\
             ALTER TABLE orders MODIFY COLUMN status ENUM('a','b');\n"
        );
    }

    #[test]
    fn test_write_sql_script_empty_outcome() {
        let temp_dir = create_temp_dir("sql_empty");
        let path = temp_dir.join("enums.sql");

        write_sql_script(&SchemaSyncOutcome::default(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    // --- open_backend TESTS ---

    #[test]
    fn test_open_backend_requires_database() {
        let result = open_backend(None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--database"));
    }

    #[test]
    fn test_open_backend_creates_database_file() {
        let temp_dir = create_temp_dir("backend_open");
        let db_path = temp_dir.join("app.sqlite");

        let mut backend = open_backend(Some(db_path.to_str().unwrap())).unwrap();
        backend
            .execute_ddl("CREATE TABLE users (id INTEGER PRIMARY KEY)")
            .unwrap();
        assert!(backend.has_table("users").unwrap());
        assert!(db_path.exists());
    }
}
