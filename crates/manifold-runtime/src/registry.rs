//! Action registry
//!
//! The authoritative action-name → owner mapping used for dispatch. An
//! action resolves to exactly one current owner; re-registration is
//! last-write-wins with the displaced owner returned.

use crate::error::{Result, RuntimeError};
use manifold_container::Container;
use manifold_plugin_api::{ActionRegistrar, Plugin};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Name reported as the displaced owner when the container loses a builtin
pub const CONTAINER_OWNER: &str = "container";

/// Current owner of an action name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOwner {
    /// One of the container's built-in pseudo-actions
    Container,
    /// A plugin, by name
    Plugin(String),
}

impl ActionOwner {
    fn display_name(&self) -> &str {
        match self {
            Self::Container => CONTAINER_OWNER,
            Self::Plugin(name) => name,
        }
    }
}

/// Action registry
///
/// Owns every installed plugin instance for the process lifetime, and the
/// action map pointing into them.
#[derive(Default)]
pub struct ActionRegistry {
    // Plugin instances, keyed by plugin name.
    plugins: HashMap<String, Box<dyn Plugin>>,
    // Action name -> current owner. Entries leave only by being overwritten
    // (or through unload_all).
    actions: HashMap<String, ActionOwner>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("plugins", &self.plugins.keys())
            .field("actions", &self.actions)
            .finish()
    }
}

struct InstallRegistrar<'a> {
    actions: &'a mut HashMap<String, ActionOwner>,
    owner: &'a str,
}

impl ActionRegistrar for InstallRegistrar<'_> {
    fn register_action(&mut self, name: &str) -> Option<String> {
        let previous = self
            .actions
            .insert(name.to_string(), ActionOwner::Plugin(self.owner.to_string()));
        debug!(action = name, plugin = self.owner, "action registered");
        previous.map(|owner| owner.display_name().to_string())
    }
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner for an action name
    ///
    /// Unconditionally overwrites any prior owner (documented last-write-wins
    /// policy) and returns it so collisions are observable.
    pub fn register_action(&mut self, name: &str, owner: ActionOwner) -> Option<ActionOwner> {
        let previous = self.actions.insert(name.to_string(), owner.clone());
        match &previous {
            Some(prev) if *prev != owner => warn!(
                action = name,
                previous = prev.display_name(),
                owner = owner.display_name(),
                "action re-registered, previous owner displaced"
            ),
            _ => debug!(
                action = name,
                owner = owner.display_name(),
                "action registered"
            ),
        }
        previous
    }

    /// Install a plugin
    ///
    /// Runs the plugin's `load` (which claims its action names through the
    /// registrar), then re-registers every name the plugin declares. Both
    /// paths converge on the same registry state; the duplication mirrors the
    /// observable startup ordering of the dispatch contract.
    pub fn install(&mut self, mut plugin: Box<dyn Plugin>) -> Result<()> {
        let plugin_name = plugin.name().to_string();

        {
            let mut registrar = InstallRegistrar {
                actions: &mut self.actions,
                owner: &plugin_name,
            };
            plugin.load(&mut registrar)?;
        }

        for action in plugin.actions() {
            self.register_action(&action, ActionOwner::Plugin(plugin_name.clone()));
        }

        info!(plugin = %plugin_name, "plugin installed");
        self.plugins.insert(plugin_name, plugin);
        Ok(())
    }

    /// Dispatch an action call to its current owner
    ///
    /// Fails with [`RuntimeError::UnregisteredAction`] when no owner exists;
    /// otherwise the owner's result or failure is propagated unchanged.
    pub fn execute_action(
        &mut self,
        name: &str,
        args: &[Value],
        container: &mut Container,
    ) -> Result<Value> {
        debug!(action = name, "dispatching action");
        match self.actions.get(name) {
            None => Err(RuntimeError::unregistered(name)),
            Some(ActionOwner::Container) => Ok(container.dispatch(name, args)?),
            Some(ActionOwner::Plugin(owner)) => {
                let owner = owner.clone();
                let plugin = self
                    .plugins
                    .get_mut(&owner)
                    .ok_or_else(|| RuntimeError::PluginNotFound(owner.clone()))?;
                Ok(plugin.execute_action(name, args, container)?)
            }
        }
    }

    /// Check whether any owner is registered for a name
    pub fn owns(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Current owner of a name, if any
    pub fn owner(&self, name: &str) -> Option<&ActionOwner> {
        self.actions.get(name)
    }

    /// All registered action names, registry-wide, sorted
    pub fn list_actions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of all installed plugins, sorted
    pub fn plugin_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of installed plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Unload every plugin and clear the registry
    ///
    /// A failing `unload` is logged and does not stop the teardown.
    pub fn unload_all(&mut self) {
        for (name, plugin) in self.plugins.iter_mut() {
            if let Err(e) = plugin.unload() {
                warn!(plugin = %name, error = %e, "plugin unload failed");
            }
        }
        self.plugins.clear();
        self.actions.clear();
        info!("all plugins unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_plugin_api::{PluginError, Result as PluginResult};
    use serde_json::json;

    #[derive(Debug)]
    struct NamedPlugin {
        name: &'static str,
        action: &'static str,
        reply: Value,
    }

    impl NamedPlugin {
        fn boxed(name: &'static str, action: &'static str, reply: Value) -> Box<dyn Plugin> {
            Box::new(Self {
                name,
                action,
                reply,
            })
        }
    }

    impl Plugin for NamedPlugin {
        fn name(&self) -> &str {
            self.name
        }

        fn load(&mut self, registrar: &mut dyn ActionRegistrar) -> PluginResult<()> {
            registrar.register_action(self.action);
            Ok(())
        }

        fn execute_action(
            &mut self,
            action: &str,
            _args: &[Value],
            _container: &mut Container,
        ) -> PluginResult<Value> {
            if action == self.action {
                Ok(self.reply.clone())
            } else {
                Err(PluginError::unknown_local(self.name, action))
            }
        }

        fn actions(&self) -> Vec<String> {
            vec![self.action.to_string()]
        }
    }

    #[test]
    fn test_install_and_dispatch() {
        let mut registry = ActionRegistry::new();
        let mut container = Container::new();
        registry
            .install(NamedPlugin::boxed("p1", "ping", json!("pong")))
            .unwrap();

        let result = registry
            .execute_action("ping", &[], &mut container)
            .unwrap();
        assert_eq!(result, json!("pong"));
    }

    #[test]
    fn test_unregistered_action() {
        let mut registry = ActionRegistry::new();
        let mut container = Container::new();
        let err = registry
            .execute_action("nothing", &[json!(1)], &mut container)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnregisteredAction(_)));
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = ActionRegistry::new();
        let mut container = Container::new();
        registry
            .install(NamedPlugin::boxed("p1", "ping", json!("from p1")))
            .unwrap();
        registry
            .install(NamedPlugin::boxed("p2", "ping", json!("from p2")))
            .unwrap();

        // Exactly one entry for "ping", owned by the later plugin.
        let actions = registry.list_actions();
        assert_eq!(actions.iter().filter(|a| *a == "ping").count(), 1);
        assert_eq!(
            registry.owner("ping"),
            Some(&ActionOwner::Plugin("p2".to_string()))
        );
        assert_eq!(
            registry.execute_action("ping", &[], &mut container).unwrap(),
            json!("from p2")
        );
    }

    #[test]
    fn test_register_action_returns_previous_owner() {
        let mut registry = ActionRegistry::new();
        assert_eq!(
            registry.register_action("a", ActionOwner::Plugin("p1".into())),
            None
        );
        assert_eq!(
            registry.register_action("a", ActionOwner::Plugin("p2".into())),
            Some(ActionOwner::Plugin("p1".into()))
        );
    }

    #[test]
    fn test_container_owner_dispatch() {
        let mut registry = ActionRegistry::new();
        let mut container = Container::new();
        for name in Container::builtin_actions() {
            registry.register_action(name, ActionOwner::Container);
        }

        registry
            .execute_action("container_set", &[json!("k"), json!(7)], &mut container)
            .unwrap();
        assert_eq!(
            registry
                .execute_action("container_get", &[json!("k")], &mut container)
                .unwrap(),
            json!(7)
        );
    }

    #[test]
    fn test_plugin_error_propagates_unchanged() {
        let mut registry = ActionRegistry::new();
        let mut container = Container::new();
        registry
            .install(NamedPlugin::boxed("p1", "ping", json!("pong")))
            .unwrap();
        // Force a local miss: point the registry entry at the plugin for a
        // name it does not own.
        registry.register_action("other", ActionOwner::Plugin("p1".into()));

        let err = registry
            .execute_action("other", &[], &mut container)
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Plugin(PluginError::UnknownLocalAction { .. })
        ));
    }

    #[test]
    fn test_unload_all_clears_registry() {
        let mut registry = ActionRegistry::new();
        registry
            .install(NamedPlugin::boxed("p1", "ping", json!("pong")))
            .unwrap();
        registry.unload_all();
        assert_eq!(registry.plugin_count(), 0);
        assert!(registry.list_actions().is_empty());
    }
}
