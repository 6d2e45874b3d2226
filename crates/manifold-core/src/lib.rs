//! # Manifold Core
//!
//! The facade tying the Manifold plugin runtime together. Embedders build a
//! [`CoreSystem`] from a [`CoreConfig`]; the rest of the process then only
//! ever touches three operations:
//!
//! - `execute(action, args)` — invoke any registered or persisted action,
//! - `get(key, kind?)` / `set(key, value, kind?)` — direct container access.
//!
//! ## Example
//!
//! ```rust,no_run
//! use manifold_core::{CoreConfig, CoreSystem};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), manifold_core::CoreError> {
//! let config = CoreConfig::new()
//!     .with_plugin_dir("plugins")
//!     .with_action_store_dir("data/actions");
//! let mut core = CoreSystem::new(config)?;
//!
//! core.execute("container_set", &[json!("greeting"), json!("hello")])?;
//! let value = core.execute("container_get", &[json!("greeting")])?;
//! assert_eq!(value, json!("hello"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod config;
mod error;
pub mod logging;
mod system;

pub use config::CoreConfig;
pub use error::{CoreError, DispatchError, Result};
pub use system::{CoreSystem, CoreSystemBuilder};

// Re-exports so embedders need only this crate
pub use manifold_container::{Container, ContainerError, ValueKind};
pub use manifold_plugin_api::{ActionRegistrar, Plugin, PluginConstructor, PluginError};
pub use manifold_runtime::{ActionOwner, ActionRegistry, PluginManager, RuntimeError};
pub use manifold_store::{ActionStore, StoreError};
