//! Plugin error types

use std::fmt;

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Plugin error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin was asked to run an action it does not own
    ///
    /// This is distinct from a registry-level miss: the registry believed the
    /// plugin owned the name, but the plugin itself disagrees.
    #[error("no action defined for '{action}' in plugin '{plugin}'")]
    UnknownLocalAction {
        /// Plugin name
        plugin: String,
        /// Requested action name
        action: String,
    },

    /// Construction or load failed
    #[error("initialization failed: {0}")]
    Init(String),

    /// Action handler failed
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Container operation failed inside a handler
    #[error(transparent)]
    Container(#[from] manifold_container::ContainerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PluginError {
    /// Create a new unknown-local-action error
    pub fn unknown_local(plugin: impl fmt::Display, action: impl fmt::Display) -> Self {
        Self::UnknownLocalAction {
            plugin: plugin.to_string(),
            action: action.to_string(),
        }
    }

    /// Create a new initialization error
    pub fn init(msg: impl fmt::Display) -> Self {
        Self::Init(msg.to_string())
    }

    /// Create a new runtime error
    pub fn runtime(msg: impl fmt::Display) -> Self {
        Self::Runtime(msg.to_string())
    }
}
