//! JS object literal generation for exportable enums.
//!
//! Each qualifying enum becomes one frozen object statement:
//!
//! ```text
//! export const Status = Object.freeze({Active:"active", Inactive:"inactive"});
//! ```
//!
//! Statements are concatenated one per line in scanner order and the
//! whole artifact overwrites the configured output file. An empty
//! aggregate writes nothing and leaves any existing file untouched;
//! regeneration is always full, so enums removed from source simply
//! drop out of the next run's output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EnumSyncResult, IoResultExt};
use crate::scan::EnumDescriptor;

/// Escape a case value for embedding in a double-quoted JS string.
fn escape_js_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render one enum as a frozen JS object statement.
///
/// Cases appear in declaration order; values are string-quoted
/// regardless of the underlying value type.
pub fn render_enum_object(descriptor: &EnumDescriptor) -> String {
    let pairs: Vec<String> = descriptor
        .cases
        .iter()
        .map(|case| format!("{}:\"{}\"", case.name, escape_js_value(&case.value)))
        .collect();

    format!(
        "export const {} = Object.freeze({{{}}});",
        descriptor.short_name,
        pairs.join(", ")
    )
}

/// Render the complete artifact: one statement per enum, one per line,
/// trimmed of leading/trailing whitespace.
pub fn render_js_module(descriptors: &[EnumDescriptor]) -> String {
    let statements: Vec<String> = descriptors.iter().map(render_enum_object).collect();
    statements.join("\n").trim().to_string()
}

/// Write an already-rendered artifact, fully overwriting any previous
/// content.
///
/// Returns `Ok(None)` for an empty artifact; the existing file is left
/// untouched in that case. A write failure on a non-empty artifact is
/// fatal.
pub fn write_rendered(rendered: &str, path: &Path) -> EnumSyncResult<Option<PathBuf>> {
    if rendered.is_empty() {
        tracing::debug!(
            file = %path.display(),
            "no exportable enums found, leaving JS objects file untouched"
        );
        return Ok(None);
    }

    fs::write(path, rendered).with_path(path)?;
    tracing::info!(file = %path.display(), "JS objects file written");
    Ok(Some(path.to_path_buf()))
}

/// Render and write the JS objects file for the given enums.
pub fn write_js_objects(
    descriptors: &[EnumDescriptor],
    path: &Path,
) -> EnumSyncResult<Option<PathBuf>> {
    write_rendered(&render_js_module(descriptors), path)
}
