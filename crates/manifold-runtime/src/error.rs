//! Runtime error types

use manifold_plugin_api::PluginError;
use std::fmt;
use std::path::Path;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Runtime error type
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A candidate plugin library could not be loaded or inspected
    ///
    /// Aborts the whole discovery batch; discovery is fail-fast, not
    /// best-effort per file.
    #[error("error loading plugin from {file}: {message}")]
    PluginLoad {
        /// Offending file
        file: String,
        /// Underlying cause
        message: String,
    },

    /// `load_plugins` failed
    ///
    /// Plugins installed before the failure remain registered.
    #[error("failed to load plugins: {0}")]
    PluginManagement(#[source] Box<RuntimeError>),

    /// No owner registered for the requested action name
    #[error("no action registered for '{0}'")]
    UnregisteredAction(String),

    /// Registry owner points at a plugin that is not installed
    #[error("plugin '{0}' is not installed")]
    PluginNotFound(String),

    /// Plugin error
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// Container error
    #[error(transparent)]
    Container(#[from] manifold_container::ContainerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Create a new plugin-load error for a file
    pub fn plugin_load(file: &Path, message: impl fmt::Display) -> Self {
        Self::PluginLoad {
            file: file.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Wrap a startup failure
    pub fn management(cause: RuntimeError) -> Self {
        Self::PluginManagement(Box::new(cause))
    }

    /// Create a new unregistered-action error
    pub fn unregistered(name: impl fmt::Display) -> Self {
        Self::UnregisteredAction(name.to_string())
    }
}
