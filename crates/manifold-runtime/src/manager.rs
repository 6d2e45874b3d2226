//! Plugin manager
//!
//! Orchestrates discovery, sequential plugin construction, and registration.
//! Startup is non-atomic: a failure part-way through `load_plugins` leaves
//! the already-installed plugins registered.

use crate::discovery::PluginDiscovery;
use crate::error::{Result, RuntimeError};
use crate::registry::{ActionOwner, ActionRegistry};
use libloading::Library;
use manifold_container::Container;
use manifold_plugin_api::{PluginConstructor, PluginTable};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// Plugin manager
#[derive(Debug)]
pub struct PluginManager {
    // Field order matters: plugin instances (inside the registry) must drop
    // before the libraries their code lives in.
    registry: ActionRegistry,
    discovery: PluginDiscovery,
    factories: PluginTable,
    libraries: Vec<Library>,
    debug: bool,
}

impl PluginManager {
    /// Create a manager over an ordered list of plugin directories
    pub fn new(directories: Vec<PathBuf>, debug: bool) -> Self {
        Self {
            registry: ActionRegistry::new(),
            discovery: PluginDiscovery::new(directories),
            factories: PluginTable::new(),
            libraries: Vec::new(),
            debug,
        }
    }

    /// Register a compiled-in plugin factory
    ///
    /// Statically registered factories take part in the same merged table as
    /// discovered ones; a discovered declaration with the same name displaces
    /// the static factory.
    pub fn register_factory(&mut self, name: &str, constructor: PluginConstructor) {
        debug!(plugin = name, "static factory registered");
        self.factories.add(name, constructor);
    }

    /// Seed the registry with the container's built-in pseudo-actions
    ///
    /// Must run before `load_plugins` so that a user plugin claiming one of
    /// the reserved names follows the ordinary last-write-wins rule.
    pub fn register_container_actions(&mut self) {
        for name in Container::builtin_actions() {
            self.registry.register_action(name, ActionOwner::Container);
        }
    }

    /// Discover, construct, and install every plugin
    ///
    /// Construction happens sequentially in table order; each plugin is fully
    /// constructed and self-registered before the next begins. Any failure is
    /// wrapped as [`RuntimeError::PluginManagement`]; no rollback of plugins
    /// installed before the failure is performed.
    pub fn load_plugins(&mut self, container: &mut Container) -> Result<()> {
        info!("loading plugins");
        self.load_plugins_inner(container)
            .map_err(RuntimeError::management)
    }

    fn load_plugins_inner(&mut self, container: &mut Container) -> Result<()> {
        let discovered = self.discovery.discover()?;

        let mut table = self.factories.clone();
        table.merge(discovered.table);
        self.libraries.extend(discovered.libraries);

        for (name, constructor) in table.iter() {
            debug!(plugin = name, "instantiating plugin");
            let plugin = constructor(container, self.debug)?;
            self.registry.install(plugin)?;
        }

        info!(
            plugins = self.registry.plugin_count(),
            actions = self.registry.list_actions().len(),
            "plugins loaded"
        );
        Ok(())
    }

    /// Dispatch an action through the registry
    pub fn execute_action(
        &mut self,
        name: &str,
        args: &[Value],
        container: &mut Container,
    ) -> Result<Value> {
        self.registry.execute_action(name, args, container)
    }

    /// All registered action names, registry-wide
    pub fn list_actions(&self) -> Vec<String> {
        self.registry.list_actions()
    }

    /// The underlying registry
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Mutable access to the underlying registry
    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    /// Unload every plugin and clear the registry
    ///
    /// Library handles stay loaded; only the instances go away.
    pub fn unload_all(&mut self) {
        info!("unloading all plugins");
        self.registry.unload_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_plugin_api::{
        ActionRegistrar, Plugin, PluginError, Result as PluginResult,
    };
    use serde_json::json;

    #[derive(Debug)]
    struct StubPlugin {
        name: &'static str,
        action: &'static str,
    }

    impl Plugin for StubPlugin {
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
                Ok(json!(self.name))
            } else {
                Err(PluginError::unknown_local(self.name, action))
            }
        }

        fn actions(&self) -> Vec<String> {
            vec![self.action.to_string()]
        }
    }

    fn alpha_ctor(_c: &mut Container, _debug: bool) -> PluginResult<Box<dyn Plugin>> {
        Ok(Box::new(StubPlugin {
            name: "alpha",
            action: "alpha_action",
        }))
    }

    fn failing_ctor(_c: &mut Container, _debug: bool) -> PluginResult<Box<dyn Plugin>> {
        Err(PluginError::init("constructor exploded"))
    }

    fn omega_ctor(_c: &mut Container, _debug: bool) -> PluginResult<Box<dyn Plugin>> {
        Ok(Box::new(StubPlugin {
            name: "omega",
            action: "omega_action",
        }))
    }

    #[test]
    fn test_load_static_factories() {
        let mut container = Container::new();
        let mut manager = PluginManager::new(vec![], false);
        manager.register_factory("Alpha", alpha_ctor);
        manager.register_factory("Omega", omega_ctor);

        manager.load_plugins(&mut container).unwrap();
        assert_eq!(
            manager.list_actions(),
            vec!["alpha_action".to_string(), "omega_action".to_string()]
        );
        assert_eq!(
            manager
                .execute_action("alpha_action", &[], &mut container)
                .unwrap(),
            json!("alpha")
        );
    }

    #[test]
    fn test_startup_is_not_atomic() {
        let mut container = Container::new();
        let mut manager = PluginManager::new(vec![], false);
        // Table order is name order: Alpha installs, Broken fails, Omega
        // never runs.
        manager.register_factory("Alpha", alpha_ctor);
        manager.register_factory("Broken", failing_ctor);
        manager.register_factory("Omega", omega_ctor);

        let err = manager.load_plugins(&mut container).unwrap_err();
        assert!(matches!(err, RuntimeError::PluginManagement(_)));

        // Plugins loaded before the failure remain registered.
        assert!(manager.registry().owns("alpha_action"));
        assert!(!manager.registry().owns("omega_action"));
    }

    #[test]
    fn test_missing_directories_load_cleanly() {
        let mut container = Container::new();
        let mut manager = PluginManager::new(vec!["/no/such/dir".into()], false);
        manager.load_plugins(&mut container).unwrap();
        assert!(manager.list_actions().is_empty());
    }

    #[test]
    fn test_container_actions_seeded_before_plugins() {
        let mut container = Container::new();
        let mut manager = PluginManager::new(vec![], false);
        manager.register_container_actions();

        assert!(manager.registry().owns("container_get"));
        assert!(manager.registry().owns("container_set"));

        manager
            .execute_action("container_set", &[json!("k"), json!("v")], &mut container)
            .unwrap();
        assert_eq!(
            manager
                .execute_action("container_get", &[json!("k")], &mut container)
                .unwrap(),
            json!("v")
        );
    }

    #[test]
    fn test_unload_all() {
        let mut container = Container::new();
        let mut manager = PluginManager::new(vec![], false);
        manager.register_factory("Alpha", alpha_ctor);
        manager.load_plugins(&mut container).unwrap();

        manager.unload_all();
        assert!(manager.list_actions().is_empty());
    }
}
