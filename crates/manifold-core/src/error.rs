//! Core system error types

use manifold_container::ContainerError;
use manifold_runtime::RuntimeError;
use manifold_store::StoreError;
use std::fmt;

/// Result type alias using [`CoreError`]
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// Any failure crossing the facade boundary on a dispatch path
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Container operation failed
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Registry/manager dispatch failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Dynamic action store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Core system error type
///
/// The facade's uniform wrapper: the original message is preserved in the
/// source chain and the action being executed is added, without altering the
/// failure's recoverability.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Startup wiring failed
    #[error("failed to initialize core system: {0}")]
    Init(#[source] DispatchError),

    /// An action execution failed
    #[error("error executing action '{action}': {source}")]
    Action {
        /// Action that was being executed
        action: String,
        /// Underlying failure
        #[source]
        source: DispatchError,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Wrap a startup failure
    pub fn init(source: impl Into<DispatchError>) -> Self {
        Self::Init(source.into())
    }

    /// Wrap a dispatch failure with the action being executed
    pub fn action(action: impl fmt::Display, source: impl Into<DispatchError>) -> Self {
        Self::Action {
            action: action.to_string(),
            source: source.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl fmt::Display) -> Self {
        Self::Config(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wrapper_preserves_message() {
        let err = CoreError::action("double", StoreError::UndefinedAction("double".into()));
        assert_eq!(
            err.to_string(),
            "error executing action 'double': no action defined for 'double'"
        );
    }

    #[test]
    fn test_source_chain_intact() {
        use std::error::Error as _;
        let err = CoreError::action("ping", RuntimeError::unregistered("ping"));
        assert!(err.source().is_some());
    }
}
