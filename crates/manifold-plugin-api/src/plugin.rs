//! Core plugin trait and types

use crate::error::Result;
use manifold_container::Container;
use serde_json::Value;
use std::fmt;

/// Registration seam handed to a plugin while it loads
///
/// Each call claims process-wide ownership of an action name for the loading
/// plugin. Registration is last-write-wins; the displaced owner's plugin
/// name, if any, is returned so collisions are observable.
pub trait ActionRegistrar {
    /// Claim ownership of `name`, returning the previous owner's plugin name
    fn register_action(&mut self, name: &str) -> Option<String>;
}

/// Core plugin trait that all plugins must implement
///
/// A plugin is constructed once by its [`PluginConstructor`], lives for the
/// process lifetime, and owns zero or more action names.
pub trait Plugin: fmt::Debug {
    /// Plugin name (must be unique; also the registry key)
    fn name(&self) -> &str;

    /// Load the plugin
    ///
    /// Called exactly once by the owning manager after construction. This is
    /// where the plugin claims its action names through the registrar.
    fn load(&mut self, registrar: &mut dyn ActionRegistrar) -> Result<()>;

    /// Unload the plugin (symmetric lifecycle hook)
    fn unload(&mut self) -> Result<()> {
        Ok(())
    }

    /// Execute one of the plugin's own actions
    ///
    /// Fails with [`PluginError::UnknownLocalAction`] when asked to run a
    /// name the plugin does not own.
    ///
    /// [`PluginError::UnknownLocalAction`]: crate::PluginError::UnknownLocalAction
    fn execute_action(
        &mut self,
        action: &str,
        args: &[Value],
        container: &mut Container,
    ) -> Result<Value>;

    /// The plugin's own action names (no registry-wide visibility)
    fn actions(&self) -> Vec<String>;
}

/// Constructor used to build a plugin instance
///
/// Takes the shared container and the runtime's debug flag. A plain fn
/// pointer so it can cross a shared-library boundary inside a
/// [`PluginDeclaration`](crate::PluginDeclaration).
pub type PluginConstructor = fn(&mut Container, bool) -> Result<Box<dyn Plugin>>;
