//! The core system facade

use crate::config::CoreConfig;
use crate::error::{CoreError, DispatchError, Result};
use manifold_container::{Container, ContainerError, ValueKind};
use manifold_plugin_api::PluginConstructor;
use manifold_runtime::PluginManager;
use manifold_store::{ActionStore, StoreError};
use serde_json::Value;
use tracing::debug;

/// Builder for a [`CoreSystem`]
///
/// Lets an embedder register compiled-in plugin factories before the load
/// pass runs.
#[derive(Debug)]
pub struct CoreSystemBuilder {
    config: CoreConfig,
    factories: Vec<(String, PluginConstructor)>,
}

impl CoreSystemBuilder {
    /// Start from a configuration
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            factories: Vec::new(),
        }
    }

    /// Register a compiled-in plugin factory
    pub fn factory(mut self, name: impl Into<String>, constructor: PluginConstructor) -> Self {
        self.factories.push((name.into(), constructor));
        self
    }

    /// Wire everything together and load plugins
    pub fn build(self) -> Result<CoreSystem> {
        debug!(config = ?self.config, "initializing core system");

        let mut container = Container::new();
        let mut manager =
            PluginManager::new(self.config.plugin_directories.clone(), self.config.debug);

        for (name, constructor) in &self.factories {
            manager.register_factory(name, *constructor);
        }

        // Builtins are seeded before user plugins so a colliding plugin
        // follows the ordinary last-write-wins rule.
        manager.register_container_actions();
        manager
            .load_plugins(&mut container)
            .map_err(CoreError::init)?;

        let store = ActionStore::open(&self.config.action_store_dir).map_err(CoreError::init)?;

        Ok(CoreSystem {
            container,
            manager,
            store,
            debug: self.config.debug,
        })
    }
}

/// The core system facade
///
/// The only entry point surrounding code should use. Owns the container, the
/// plugin manager (and through it the registry and library handles), and the
/// dynamic action store — all state is reached through this one value, on a
/// single logical thread of control.
#[derive(Debug)]
pub struct CoreSystem {
    container: Container,
    manager: PluginManager,
    store: ActionStore,
    debug: bool,
}

impl CoreSystem {
    /// Build a core system with no compiled-in factories
    pub fn new(config: CoreConfig) -> Result<Self> {
        CoreSystemBuilder::new(config).build()
    }

    /// Start building a core system
    pub fn builder(config: CoreConfig) -> CoreSystemBuilder {
        CoreSystemBuilder::new(config)
    }

    /// Execute an action by name
    ///
    /// The two container builtins dispatch straight to the container; every
    /// other name goes through the registry (live owner wins) and then the
    /// persisted action store. Any failure is wrapped as
    /// [`CoreError::Action`] carrying the action name.
    pub fn execute(&mut self, action: &str, args: &[Value]) -> Result<Value> {
        debug!(action, "executing action");
        let result: std::result::Result<Value, DispatchError> = if Container::is_builtin(action) {
            self.container.dispatch(action, args).map_err(Into::into)
        } else {
            let Self {
                container,
                manager,
                store,
                ..
            } = self;
            store
                .execute_action(action, args, manager.registry_mut(), container)
                .map_err(Into::into)
        };
        result.map_err(|e| CoreError::action(action, e))
    }

    /// Read a key from the container (direct pass-through)
    pub fn get(&self, key: &str, expected: Option<ValueKind>) -> Result<Value, ContainerError> {
        self.container.get(key, expected)
    }

    /// Write a key into the container (direct pass-through)
    pub fn set(
        &mut self,
        key: &str,
        value: Value,
        expected: Option<ValueKind>,
    ) -> Result<(), ContainerError> {
        self.container.set(key, value, expected)
    }

    /// All registered action names, registry-wide
    pub fn list_actions(&self) -> Vec<String> {
        self.manager.list_actions()
    }

    /// Register a standalone script function as a persistent action
    pub fn add_action(
        &mut self,
        name: &str,
        source: &str,
        alias: Option<&str>,
    ) -> Result<(), StoreError> {
        self.store.add_action(name, source, alias)
    }

    /// Remove a persistent action
    pub fn remove_action(&mut self, name: &str) -> Result<(), StoreError> {
        self.store.remove_action(name)
    }

    /// Unload every plugin (symmetric shutdown)
    pub fn shutdown(&mut self) {
        self.manager.unload_all();
    }

    /// Whether debug logging was requested
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The shared container
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable access to the shared container
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// The plugin manager
    pub fn plugin_manager(&self) -> &PluginManager {
        &self.manager
    }

    /// The dynamic action store
    pub fn action_store(&self) -> &ActionStore {
        &self.store
    }
}
