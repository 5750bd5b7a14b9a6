//! Deterministic enum source discovery with efficient directory pruning.
//!
//! Walks each configured location in declared order, resolves candidate
//! file names against the enum registry, and yields descriptors for the
//! registered types. Discovery characteristics:
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - File names sorted per directory so output order is reproducible
//! - Lazy across locations: a directory is read only when reached
//!
//! Skips are routine, never errors: missing directories, files whose
//! stem resolves to no registration, and non-`.rs` files are all passed
//! over silently (with a debug diagnostic).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::EnumLocation;
use crate::error::{EnumSyncError, EnumSyncResult};
use crate::registry::{Capability, CapabilitySet, EnumCase, EnumRegistry, TableColumnTarget};

/// Directories to exclude by default (standard project conventions).
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules", ".cargo"];

/// Checks if a directory entry should be pruned (excluded from traversal).
///
/// This is called by `WalkDir::filter_entry` and enables O(1) subtree
/// skipping for excluded directories.
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// A resolved enum occurrence: the registration joined with the source
/// file it was discovered through. Immutable once constructed; rebuilt
/// fresh on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Fully qualified type name (`namespace prefix + file stem`).
    pub qualified_name: String,
    /// Short type name used in JS exports and label keys.
    pub short_name: String,
    /// File the candidate was discovered through.
    pub source_path: PathBuf,
    /// Case name/value pairs in declaration order.
    pub cases: Vec<EnumCase>,
    /// Capability tags carried by the registration.
    pub capabilities: CapabilitySet,
    /// Declared table column targets.
    pub tables: Vec<TableColumnTarget>,
}

impl EnumDescriptor {
    /// Whether this enum is included in the JS objects file.
    pub fn is_exportable(&self) -> bool {
        self.capabilities.contains(Capability::JsExport)
    }

    /// Whether this enum participates in schema synchronization.
    pub fn is_syncable(&self) -> bool {
        self.capabilities.contains(Capability::SchemaSync)
    }
}

/// Gathers all `.rs` files under one directory, sorted by path.
///
/// Sorting makes within-directory discovery order reproducible across
/// runs and platforms; location order stays the caller's declared order.
fn gather_enum_files(dir: &Path) -> EnumSyncResult<Vec<PathBuf>> {
    let excludes: HashSet<&str> = EXCLUDED_DIRS.iter().copied().collect();

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
    {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            match e.into_io_error() {
                Some(io) => EnumSyncError::io(path, io),
                None => EnumSyncError::Internal {
                    message: format!("walk failed under {}", dir.display()),
                },
            }
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Lazy scanner over configured locations.
///
/// Yields one descriptor per resolvable source file; an I/O failure
/// while reading a directory is yielded once and ends the scan.
pub struct EnumScanner<'a> {
    registry: &'a EnumRegistry,
    locations: std::slice::Iter<'a, EnumLocation>,
    current: Option<LocationFiles>,
    done: bool,
}

struct LocationFiles {
    namespace: String,
    files: std::vec::IntoIter<PathBuf>,
}

impl<'a> EnumScanner<'a> {
    pub fn new(locations: &'a [EnumLocation], registry: &'a EnumRegistry) -> Self {
        Self {
            registry,
            locations: locations.iter(),
            current: None,
            done: false,
        }
    }
}

/// Resolve one discovered file against the registry; `None` is a skip.
fn resolve_file(registry: &EnumRegistry, namespace: &str, path: PathBuf) -> Option<EnumDescriptor> {
    let stem = path.file_stem()?.to_str()?;
    let qualified_name = format!("{namespace}{stem}");

    match registry.resolve(&qualified_name) {
        Some(registration) => Some(EnumDescriptor {
            qualified_name,
            short_name: registration.short_name().to_string(),
            source_path: path,
            cases: registration.cases.clone(),
            capabilities: registration.capabilities,
            tables: registration.tables.clone(),
        }),
        None => {
            tracing::debug!(
                candidate = %qualified_name,
                file = %path.display(),
                "no registration for candidate, skipping"
            );
            None
        }
    }
}

impl Iterator for EnumScanner<'_> {
    type Item = EnumSyncResult<EnumDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let registry = self.registry;
        loop {
            if let Some(current) = self.current.as_mut() {
                for path in current.files.by_ref() {
                    if let Some(descriptor) = resolve_file(registry, &current.namespace, path) {
                        return Some(Ok(descriptor));
                    }
                }
            }
            self.current = None;

            let location = self.locations.next()?;

            if !location.directory.exists() {
                tracing::debug!(
                    directory = %location.directory.display(),
                    "location does not exist, skipping"
                );
                continue;
            }

            match gather_enum_files(&location.directory) {
                Ok(files) => {
                    self.current = Some(LocationFiles {
                        namespace: location.namespace.clone(),
                        files: files.into_iter(),
                    });
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Scan all locations lazily.
pub fn scan<'a>(locations: &'a [EnumLocation], registry: &'a EnumRegistry) -> EnumScanner<'a> {
    EnumScanner::new(locations, registry)
}

/// Scan all locations into a vector, propagating the first I/O failure.
pub fn scan_all(
    locations: &[EnumLocation],
    registry: &EnumRegistry,
) -> EnumSyncResult<Vec<EnumDescriptor>> {
    scan(locations, registry).collect()
}

/// Descriptors carrying the JS-export capability, in scan order.
pub fn exportable_enums(
    locations: &[EnumLocation],
    registry: &EnumRegistry,
) -> EnumSyncResult<Vec<EnumDescriptor>> {
    let descriptors = scan_all(locations, registry)?;
    Ok(descriptors.into_iter().filter(EnumDescriptor::is_exportable).collect())
}

/// Descriptors carrying the schema-sync capability, in scan order.
pub fn syncable_enums(
    locations: &[EnumLocation],
    registry: &EnumRegistry,
) -> EnumSyncResult<Vec<EnumDescriptor>> {
    let descriptors = scan_all(locations, registry)?;
    Ok(descriptors.into_iter().filter(EnumDescriptor::is_syncable).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnumRegistration;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("enumsync_scan_{}_{id}", std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn location(dir: &Path, namespace: &str) -> EnumLocation {
        EnumLocation {
            directory: dir.to_path_buf(),
            namespace: namespace.to_string(),
        }
    }

    fn registry_with_status() -> EnumRegistry {
        let mut registry = EnumRegistry::new();
        registry
            .register(
                EnumRegistration::new("app::enums::Status")
                    .unwrap()
                    .case("Active", "active")
                    .case("Inactive", "inactive")
                    .capability(Capability::JsExport)
                    .capability(Capability::SchemaSync)
                    .table("users", "status"),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let registry = registry_with_status();
        let locations = vec![location(Path::new("/no/such/enumsync/dir"), "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_resolves_registered_file() {
        let dir = temp_dir();
        write_file(&dir.join("Status.rs"), "pub enum Status {}");
        let registry = registry_with_status();
        let locations = vec![location(&dir, "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qualified_name, "app::enums::Status");
        assert_eq!(found[0].short_name, "Status");
        assert_eq!(found[0].cases.len(), 2);
        assert_eq!(found[0].tables[0].column, "status");
    }

    #[test]
    fn test_unregistered_files_skipped() {
        let dir = temp_dir();
        write_file(&dir.join("Status.rs"), "");
        write_file(&dir.join("Helper.rs"), "");
        write_file(&dir.join("notes.txt"), "");
        let registry = registry_with_status();
        let locations = vec![location(&dir, "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name, "Status");
    }

    #[test]
    fn test_files_sorted_within_directory() {
        let dir = temp_dir();
        // Created out of order on purpose
        write_file(&dir.join("Status.rs"), "");
        write_file(&dir.join("Priority.rs"), "");

        let mut registry = EnumRegistry::new();
        for name in ["Priority", "Status"] {
            registry
                .register(
                    EnumRegistration::new(format!("app::enums::{name}"))
                        .unwrap()
                        .case("A", "a")
                        .capability(Capability::JsExport),
                )
                .unwrap();
        }
        let locations = vec![location(&dir, "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.short_name.as_str()).collect();
        assert_eq!(names, vec!["Priority", "Status"]);
    }

    #[test]
    fn test_locations_processed_in_declared_order() {
        let first = temp_dir();
        let second = temp_dir();
        write_file(&first.join("Zeta.rs"), "");
        write_file(&second.join("Alpha.rs"), "");

        let mut registry = EnumRegistry::new();
        registry
            .register(EnumRegistration::new("one::Zeta").unwrap().case("A", "a"))
            .unwrap();
        registry
            .register(EnumRegistration::new("two::Alpha").unwrap().case("B", "b"))
            .unwrap();

        let locations = vec![location(&first, "one::"), location(&second, "two::")];
        let found = scan_all(&locations, &registry).unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["one::Zeta", "two::Alpha"]);
    }

    #[test]
    fn test_nested_files_discovered() {
        let dir = temp_dir();
        write_file(&dir.join("billing/Status.rs"), "");
        let registry = registry_with_status();
        let locations = vec![location(&dir, "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].source_path.ends_with("billing/Status.rs"));
    }

    #[test]
    fn test_excluded_directories_pruned() {
        let dir = temp_dir();
        write_file(&dir.join(".git/Status.rs"), "");
        write_file(&dir.join("target/Status.rs"), "");
        let registry = registry_with_status();
        let locations = vec![location(&dir, "app::enums::")];

        let found = scan_all(&locations, &registry).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_capability_filters() {
        let dir = temp_dir();
        write_file(&dir.join("Status.rs"), "");
        write_file(&dir.join("Internal.rs"), "");

        let mut registry = registry_with_status();
        registry
            .register(
                EnumRegistration::new("app::enums::Internal")
                    .unwrap()
                    .case("Hidden", "hidden"),
            )
            .unwrap();
        let locations = vec![location(&dir, "app::enums::")];

        let exportable = exportable_enums(&locations, &registry).unwrap();
        assert_eq!(exportable.len(), 1);
        assert_eq!(exportable[0].short_name, "Status");

        let syncable = syncable_enums(&locations, &registry).unwrap();
        assert_eq!(syncable.len(), 1);

        // Untagged registration is discovered but qualifies for neither
        let all = scan_all(&locations, &registry).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_scan_is_restartable() {
        let dir = temp_dir();
        write_file(&dir.join("Status.rs"), "");
        let registry = registry_with_status();
        let locations = vec![location(&dir, "app::enums::")];

        let first = scan_all(&locations, &registry).unwrap();
        let second = scan_all(&locations, &registry).unwrap();
        assert_eq!(first, second);
    }
}
