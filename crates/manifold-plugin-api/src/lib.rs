//! # Manifold Plugin API
//!
//! SDK for writing Manifold plugins.
//!
//! A plugin is a unit of behavior that claims ownership of one or more named
//! actions when it loads, and answers [`Plugin::execute_action`] calls for
//! those names afterwards. Plugins are either compiled into the host and
//! registered as factories, or built as shared libraries and exported with
//! [`export_plugins!`] so the runtime's discoverer can pick them up.
//!
//! ## Example
//!
//! ```rust
//! use manifold_container::Container;
//! use manifold_plugin_api::{ActionRegistrar, Plugin, PluginError};
//! use serde_json::Value;
//!
//! #[derive(Debug, Default)]
//! struct Greeter;
//!
//! impl Plugin for Greeter {
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn load(&mut self, registrar: &mut dyn ActionRegistrar) -> Result<(), PluginError> {
//!         registrar.register_action("greet");
//!         Ok(())
//!     }
//!
//!     fn execute_action(
//!         &mut self,
//!         action: &str,
//!         args: &[Value],
//!         _container: &mut Container,
//!     ) -> Result<Value, PluginError> {
//!         match action {
//!             "greet" => Ok(Value::String(format!("hello {:?}", args))),
//!             other => Err(PluginError::unknown_local("greeter", other)),
//!         }
//!     }
//!
//!     fn actions(&self) -> Vec<String> {
//!         vec!["greet".to_string()]
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod export;
pub mod plugin;

pub use error::{PluginError, Result};
pub use export::{PluginDeclaration, PluginTable, API_VERSION, DECLARATION_SYMBOL};
pub use plugin::{ActionRegistrar, Plugin, PluginConstructor};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::error::{PluginError, Result};
    pub use crate::export::{PluginDeclaration, PluginTable};
    pub use crate::plugin::{ActionRegistrar, Plugin, PluginConstructor};
}
