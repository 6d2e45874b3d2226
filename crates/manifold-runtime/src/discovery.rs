//! Plugin discovery
//!
//! Scans an ordered list of directories (non-recursively) for plugin
//! libraries and merges their exported constructor tables into one. A missing
//! directory is a warning, not an error; any failure on a single candidate
//! file aborts the whole batch.

use crate::error::{Result, RuntimeError};
use libloading::Library;
use manifold_plugin_api::{PluginDeclaration, PluginTable, API_VERSION, DECLARATION_SYMBOL};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Files whose name starts with this prefix are never treated as plugins
pub const RESERVED_PREFIX: &str = "_";

/// Plugin discoverer
#[derive(Debug, Clone)]
pub struct PluginDiscovery {
    directories: Vec<PathBuf>,
}

/// Result of a discovery pass
///
/// The library handles must stay alive for as long as any plugin constructed
/// from the table; dropping a [`Library`] unmaps the code its constructors
/// point into.
#[derive(Debug, Default)]
pub struct DiscoveredPlugins {
    /// Merged constructor table (name collisions collapse last-write-wins)
    pub table: PluginTable,

    /// Handles of every library the table's constructors came from
    pub libraries: Vec<Library>,
}

impl PluginDiscovery {
    /// Create a discoverer over an ordered directory list
    pub fn new(directories: Vec<PathBuf>) -> Self {
        debug!(?directories, "plugin discovery configured");
        Self { directories }
    }

    /// The configured directories
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Scan every configured directory
    ///
    /// Directories are visited in configuration order and files within a
    /// directory in sorted name order, but the merged table is keyed by
    /// declaration name, so instantiation order downstream is name order.
    pub fn discover(&self) -> Result<DiscoveredPlugins> {
        let mut discovered = DiscoveredPlugins::default();
        for directory in &self.directories {
            if !directory.exists() {
                warn!(directory = %directory.display(), "plugin directory does not exist");
                continue;
            }
            self.scan_directory(directory, &mut discovered)?;
        }
        debug!(plugins = discovered.table.len(), "discovery complete");
        Ok(discovered)
    }

    fn scan_directory(&self, directory: &Path, discovered: &mut DiscoveredPlugins) -> Result<()> {
        debug!(directory = %directory.display(), "scanning plugin directory");

        let mut candidates: Vec<PathBuf> = std::fs::read_dir(directory)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| is_plugin_file(path))
            .collect();
        candidates.sort();

        for path in candidates {
            let (library, table) = load_library(&path)?;
            debug!(
                file = %path.display(),
                plugins = table.len(),
                "loaded plugin library"
            );
            discovered.table.merge(table);
            discovered.libraries.push(library);
        }
        Ok(())
    }
}

/// Check whether a path looks like a candidate plugin library
fn is_plugin_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == std::env::consts::DLL_EXTENSION)
        .unwrap_or(false);
    let reserved = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(RESERVED_PREFIX))
        .unwrap_or(true);
    has_extension && !reserved
}

/// Load one plugin library and read its declaration
///
/// # Safety
///
/// Loading shared libraries is inherently unsafe. The library must export a
/// [`PluginDeclaration`] under the expected symbol (use `export_plugins!`),
/// be built against the same plugin-api version, and with the same toolchain
/// as the host. The version check below catches the first mistake, nothing
/// catches the second.
fn load_library(path: &Path) -> Result<(Library, PluginTable)> {
    let library =
        unsafe { Library::new(path) }.map_err(|e| RuntimeError::plugin_load(path, e))?;

    let declaration: PluginDeclaration = unsafe {
        library
            .get::<*const PluginDeclaration>(DECLARATION_SYMBOL)
            .map_err(|e| RuntimeError::plugin_load(path, e))?
            .read()
    };

    if declaration.api_version != API_VERSION {
        return Err(RuntimeError::plugin_load(
            path,
            format!(
                "plugin API version mismatch: host {}, plugin {}",
                API_VERSION, declaration.api_version
            ),
        ));
    }

    let mut table = PluginTable::new();
    (declaration.register)(&mut table);
    Ok((library, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dll_name(stem: &str) -> String {
        format!("{}.{}", stem, std::env::consts::DLL_EXTENSION)
    }

    #[test]
    fn test_missing_directory_is_not_fatal() {
        let discovery = PluginDiscovery::new(vec![PathBuf::from("/no/such/directory")]);
        let discovered = discovery.discover().unwrap();
        assert!(discovered.table.is_empty());
        assert!(discovered.libraries.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = PluginDiscovery::new(vec![dir.path().to_path_buf()]);
        assert!(discovery.discover().unwrap().table.is_empty());
    }

    #[test]
    fn test_corrupt_library_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(dll_name("broken")), b"not a shared library").unwrap();

        let discovery = PluginDiscovery::new(vec![dir.path().to_path_buf()]);
        let err = discovery.discover().unwrap_err();
        assert!(matches!(err, RuntimeError::PluginLoad { .. }));
    }

    #[test]
    fn test_reserved_prefix_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        // Garbage content, but the reserved prefix keeps it out of the batch.
        fs::write(dir.path().join(dll_name("_disabled")), b"garbage").unwrap();

        let discovery = PluginDiscovery::new(vec![dir.path().to_path_buf()]);
        assert!(discovery.discover().unwrap().table.is_empty());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), b"hello").unwrap();

        let discovery = PluginDiscovery::new(vec![dir.path().to_path_buf()]);
        assert!(discovery.discover().unwrap().table.is_empty());
    }
}
