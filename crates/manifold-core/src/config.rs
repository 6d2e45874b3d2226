//! Core system configuration

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Verbose runtime logging
    pub debug: bool,

    /// Ordered list of directories scanned (non-recursively) for plugin
    /// libraries at startup
    pub plugin_directories: Vec<PathBuf>,

    /// Directory holding the dynamic action store (generated files plus the
    /// JSON index)
    pub action_store_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            debug: false,
            plugin_directories: Vec::new(),
            action_store_dir: PathBuf::from("data/actions"),
        }
    }
}

impl CoreConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Append a plugin directory
    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_directories.push(dir.into());
        self
    }

    /// Replace the plugin directory list
    pub fn with_plugin_directories(mut self, dirs: Vec<PathBuf>) -> Self {
        self.plugin_directories = dirs;
        self
    }

    /// Set the action store directory
    pub fn with_action_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.action_store_dir = dir.into();
        self
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::config(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| CoreError::config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::new();
        assert!(!config.debug);
        assert!(config.plugin_directories.is_empty());
        assert_eq!(config.action_store_dir, PathBuf::from("data/actions"));
    }

    #[test]
    fn test_builder_methods() {
        let config = CoreConfig::new()
            .with_debug(true)
            .with_plugin_dir("plugins")
            .with_plugin_dir("extra")
            .with_action_store_dir("store");
        assert!(config.debug);
        assert_eq!(config.plugin_directories.len(), 2);
        assert_eq!(config.action_store_dir, PathBuf::from("store"));
    }

    #[test]
    fn test_from_json() {
        let config: CoreConfig = serde_json::from_str(
            r#"{ "debug": true, "plugin_directories": ["plugins"] }"#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.plugin_directories, vec![PathBuf::from("plugins")]);
        // Omitted fields fall back to defaults.
        assert_eq!(config.action_store_dir, PathBuf::from("data/actions"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = CoreConfig::from_path("/no/such/config.json").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
