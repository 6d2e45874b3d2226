//! Shared-library export surface
//!
//! A plugin library does not get introspected for types; it exports an
//! explicit [`PluginDeclaration`] under [`DECLARATION_SYMBOL`] that fills a
//! [`PluginTable`] with named constructors. The runtime's discoverer resolves
//! the symbol, checks the API version, and merges the table into its own.

use crate::plugin::PluginConstructor;
use std::collections::BTreeMap;

/// API version baked into every declaration
///
/// The loader refuses declarations built against a different version of this
/// crate. This is a coarse guard, not an ABI guarantee: host and plugins must
/// be built with the same toolchain.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Symbol name the loader resolves in a plugin library
pub const DECLARATION_SYMBOL: &[u8] = b"manifold_plugin_declaration\0";

/// Table of named plugin constructors
///
/// Keyed by declaration name; insertion is last-write-wins, so two libraries
/// declaring the same name silently collapse to the later one. Ordered so
/// instantiation order is deterministic.
#[derive(Debug, Default, Clone)]
pub struct PluginTable {
    entries: BTreeMap<String, PluginConstructor>,
}

impl PluginTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constructor, returning the one it displaced, if any
    pub fn add(&mut self, name: &str, constructor: PluginConstructor) -> Option<PluginConstructor> {
        self.entries.insert(name.to_string(), constructor)
    }

    /// Merge another table into this one (other wins on collisions)
    pub fn merge(&mut self, other: PluginTable) {
        self.entries.extend(other.entries);
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, PluginConstructor)> {
        self.entries.iter().map(|(name, ctor)| (name.as_str(), *ctor))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

/// Declaration a plugin library exports
///
/// Usually produced by [`export_plugins!`] rather than written by hand.
#[derive(Debug, Clone, Copy)]
pub struct PluginDeclaration {
    /// [`API_VERSION`] of the plugin-api crate the library was built against
    pub api_version: &'static str,

    /// Fills the table with the library's named constructors
    pub register: fn(&mut PluginTable),
}

/// Export a set of plugin constructors from a `cdylib` crate
///
/// ```rust,ignore
/// manifold_plugin_api::export_plugins! {
///     "EchoPlugin" => echo::new_plugin,
/// }
/// ```
#[macro_export]
macro_rules! export_plugins {
    ($( $name:literal => $ctor:expr ),+ $(,)?) => {
        #[doc(hidden)]
        pub fn __manifold_register(table: &mut $crate::PluginTable) {
            $( table.add($name, $ctor); )+
        }

        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        #[no_mangle]
        pub static manifold_plugin_declaration: $crate::PluginDeclaration =
            $crate::PluginDeclaration {
                api_version: $crate::API_VERSION,
                register: __manifold_register,
            };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::plugin::{ActionRegistrar, Plugin};
    use manifold_container::Container;
    use serde_json::{json, Value};

    #[derive(Debug, Default)]
    struct NoopPlugin;

    impl Plugin for NoopPlugin {
        fn name(&self) -> &str {
            "noop"
        }

        fn load(&mut self, _registrar: &mut dyn ActionRegistrar) -> Result<()> {
            Ok(())
        }

        fn execute_action(
            &mut self,
            _action: &str,
            _args: &[Value],
            _container: &mut Container,
        ) -> Result<Value> {
            Ok(json!(null))
        }

        fn actions(&self) -> Vec<String> {
            vec![]
        }
    }

    fn new_noop(_container: &mut Container, _debug: bool) -> Result<Box<dyn Plugin>> {
        Ok(Box::new(NoopPlugin))
    }

    #[test]
    fn test_table_collision_overwrites() {
        let mut table = PluginTable::new();
        assert!(table.add("Noop", new_noop).is_none());
        assert!(table.add("Noop", new_noop).is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut first = PluginTable::new();
        first.add("A", new_noop);
        let mut second = PluginTable::new();
        second.add("A", new_noop);
        second.add("B", new_noop);

        first.merge(second);
        assert_eq!(first.len(), 2);
        assert!(first.contains("A"));
        assert!(first.contains("B"));
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut table = PluginTable::new();
        table.add("Zeta", new_noop);
        table.add("Alpha", new_noop);
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
