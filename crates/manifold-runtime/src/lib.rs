//! # Manifold Runtime
//!
//! Plugin discovery, the process-wide action registry, and lifecycle
//! management.
//!
//! - **Discovery** scans an ordered list of directories for plugin libraries
//!   and merges their exported constructor tables (fail-fast per batch).
//! - **Registry** maps each action name to its current owner and dispatches
//!   calls; registration is last-write-wins with the displaced owner
//!   returned.
//! - **Manager** orchestrates discovery, sequential construction, and
//!   registration; startup is non-atomic, so plugins loaded before a failure
//!   stay registered.
//!
//! ## Example
//!
//! ```rust
//! use manifold_container::Container;
//! use manifold_runtime::PluginManager;
//!
//! # fn main() -> manifold_runtime::Result<()> {
//! let mut container = Container::new();
//! let mut manager = PluginManager::new(vec!["plugins".into()], false);
//! manager.register_container_actions();
//! manager.load_plugins(&mut container)?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod discovery;
pub mod error;
pub mod manager;
pub mod registry;

pub use discovery::{DiscoveredPlugins, PluginDiscovery, RESERVED_PREFIX};
pub use error::{Result, RuntimeError};
pub use manager::PluginManager;
pub use registry::{ActionOwner, ActionRegistry};

// Re-export plugin API types for convenience
pub use manifold_plugin_api::{ActionRegistrar, Plugin, PluginConstructor, PluginError, PluginTable};

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::error::{Result, RuntimeError};
    pub use crate::manager::PluginManager;
    pub use crate::registry::{ActionOwner, ActionRegistry};
    pub use manifold_plugin_api::prelude::*;
}
