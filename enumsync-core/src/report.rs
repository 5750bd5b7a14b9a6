//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::schema::SchemaSyncOutcome;
use crate::sync::{SyncFailure, SyncSummary};

/// Prints a synchronization summary in plain text format.
pub fn print_plain(summary: &SyncSummary) {
    if summary.js.exported.is_empty() {
        println!("No exportable enums found.");
    } else {
        match &summary.js.file {
            Some(path) => println!(
                "EXPORTED ENUMS ({}) -> {}:",
                summary.js.exported.len(),
                path.display()
            ),
            None => println!("EXPORTED ENUMS ({}) [dry-run]:", summary.js.exported.len()),
        }
        for name in &summary.js.exported {
            println!("- {}", name);
        }
    }

    print_schema_plain(&summary.schema);
}

/// Prints just the schema synchronization outcome in plain text format.
pub fn print_schema_plain(schema: &SchemaSyncOutcome) {
    if schema.is_empty() {
        println!("No enum columns to synchronize.");
        return;
    }
    if !schema.updated.is_empty() {
        println!("UPDATED COLUMNS ({}):", schema.updated.len());
        for col in &schema.updated {
            println!("- {}.{}", col.table, col.column);
        }
    }
    if !schema.skipped.is_empty() {
        println!("SKIPPED COLUMNS ({}):", schema.skipped.len());
        for col in &schema.skipped {
            println!("- {}.{} ({})", col.table, col.column, col.reason);
        }
    }
}

/// Prints a synchronization summary in JSON format.
///
/// Falls back to a minimal format if serialization fails.
pub fn print_json(summary: &SyncSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            // Fallback: output in a simpler format
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!(
                "{{\"exported\": {}, \"updated\": {}, \"skipped\": {}}}",
                summary.js.exported.len(),
                summary.schema.updated.len(),
                summary.schema.skipped.len()
            );
        }
    }
}

/// Prints a pipeline failure: the error itself plus everything that was
/// applied before it, so a failed run never hides completed work.
pub fn print_failure_plain(failure: &SyncFailure) {
    eprintln!("[ERROR] {}", failure.error);

    if let Some(js) = &failure.js {
        if let Some(path) = &js.file {
            println!("JS objects were written to {} before the failure.", path.display());
        }
    }
    if !failure.schema.updated.is_empty() {
        println!("COLUMNS APPLIED BEFORE FAILURE ({}):", failure.schema.updated.len());
        for col in &failure.schema.updated {
            println!("- {}.{}", col.table, col.column);
        }
    }
}

/// Prints a pipeline failure in JSON format.
pub fn print_failure_json(failure: &SyncFailure) {
    let js_file = failure
        .js
        .as_ref()
        .and_then(|js| js.file.as_ref())
        .map(|p| p.display().to_string());
    let output = json!({
        "error": failure.error.to_string(),
        "js_file": js_file,
        "updated": failure.schema.updated,
        "skipped": failure.schema.skipped,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"error\": {:?}}}", failure.error.to_string());
        }
    }
}
