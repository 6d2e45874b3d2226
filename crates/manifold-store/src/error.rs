//! Action store error types

use manifold_runtime::RuntimeError;
use std::fmt;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Action store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Neither a live registry owner nor a persisted record for the name
    #[error("no action defined for '{0}'")]
    UndefinedAction(String),

    /// Source text does not contain a function declaration
    #[error("invalid action source: {0}")]
    InvalidSource(String),

    /// Script compilation or execution failed
    #[error("script error in action '{action}': {message}")]
    Script {
        /// Action name
        action: String,
        /// Engine error message
        message: String,
    },

    /// Registry dispatch failed (registry-first path)
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a new script error
    pub fn script(action: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Script {
            action: action.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a new invalid-source error
    pub fn invalid_source(msg: impl fmt::Display) -> Self {
        Self::InvalidSource(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UndefinedAction("double".to_string());
        assert_eq!(err.to_string(), "no action defined for 'double'");

        let err = StoreError::script("double", "divide by zero");
        assert_eq!(
            err.to_string(),
            "script error in action 'double': divide by zero"
        );
    }
}
