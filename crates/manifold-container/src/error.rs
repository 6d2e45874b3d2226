//! Container error types

use crate::value::ValueKind;
use std::fmt;

/// Result type for container operations
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Container error type
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Value does not satisfy the expected type
    #[error("value for '{key}' must be of type {expected}, got {actual}")]
    TypeMismatch {
        /// Key the check was performed for
        key: String,
        /// The type the caller required
        expected: ValueKind,
        /// The type the value actually has
        actual: ValueKind,
    },

    /// Built-in action called with malformed arguments
    #[error("invalid arguments for '{action}': {message}")]
    InvalidArguments {
        /// Built-in action name
        action: String,
        /// What was wrong
        message: String,
    },

    /// Name is not one of the container's built-in actions
    #[error("unknown container action '{0}'")]
    UnknownAction(String),

    /// Unparseable type name in a dispatch argument
    #[error("unknown value type '{0}'")]
    UnknownKind(String),
}

impl ContainerError {
    /// Create a new invalid-arguments error
    pub fn invalid_arguments(action: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::InvalidArguments {
            action: action.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContainerError::TypeMismatch {
            key: "count".to_string(),
            expected: ValueKind::Number,
            actual: ValueKind::String,
        };
        assert_eq!(
            err.to_string(),
            "value for 'count' must be of type number, got string"
        );
    }
}
