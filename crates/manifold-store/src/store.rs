//! The dynamic action store

use crate::error::{Result, StoreError};
use manifold_container::Container;
use manifold_runtime::ActionRegistry;
use rhai::{Dynamic, Engine, Scope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Name of the JSON index file inside the store directory
pub const INDEX_FILE: &str = "action_index.json";

/// Persisted record for one dynamic action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Generated file holding the function source
    pub filename: String,
    /// Name the function is exposed under inside the file
    pub func_name: String,
}

/// File-backed dynamic action store
///
/// The index is read once at construction and rewritten in full on every
/// mutation. Neither the index nor the generated files are written
/// crash-atomically.
pub struct ActionStore {
    directory: PathBuf,
    index_path: PathBuf,
    records: BTreeMap<String, ActionRecord>,
    engine: Engine,
}

impl std::fmt::Debug for ActionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionStore")
            .field("directory", &self.directory)
            .field("records", &self.records)
            .finish()
    }
}

impl ActionStore {
    /// Open (or create) a store rooted at `directory`
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        let index_path = directory.join(INDEX_FILE);

        let records = if index_path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&index_path)?)?
        } else {
            BTreeMap::new()
        };

        debug!(
            directory = %directory.display(),
            actions = records.len(),
            "action store opened"
        );

        Ok(Self {
            directory,
            index_path,
            records,
            engine: build_engine(),
        })
    }

    /// Register a standalone script function as a named action
    ///
    /// The source must declare a rhai function; its declared name is taken
    /// from the first `fn <ident>` in the text. The function is exposed under
    /// `alias` when given, otherwise under the action name itself; when the
    /// declared name differs, the source is retargeted by a first-occurrence
    /// textual substitution. That substitution is not a syntax-aware rename —
    /// an earlier occurrence of the same `fn <name>` substring (for example
    /// in a comment) would be corrupted instead.
    ///
    /// Overwrites any prior record for the name.
    pub fn add_action(&mut self, name: &str, source: &str, alias: Option<&str>) -> Result<()> {
        let declared = declared_fn_name(source).ok_or_else(|| {
            StoreError::invalid_source(format!(
                "no function declaration found in source for '{}'",
                name
            ))
        })?;
        let exposed = alias.unwrap_or(name).to_string();

        let source = if declared != exposed {
            source.replacen(
                &format!("fn {}", declared),
                &format!("fn {}", exposed),
                1,
            )
        } else {
            source.to_string()
        };

        let filename = format!("{}.rhai", Uuid::new_v4());
        std::fs::write(self.directory.join(&filename), source)?;

        self.records.insert(
            name.to_string(),
            ActionRecord {
                filename: filename.clone(),
                func_name: exposed,
            },
        );
        self.save_index()?;

        info!(action = name, file = %filename, "dynamic action added");
        Ok(())
    }

    /// Execute an action, giving the live registry priority
    ///
    /// A registry owner wins outright and the persisted record is never
    /// consulted. Otherwise the backing file is read and compiled fresh on
    /// every call — repeated calls pay the full reload cost — and the exposed
    /// function is invoked with `args`. With neither source, fails with
    /// [`StoreError::UndefinedAction`].
    pub fn execute_action(
        &mut self,
        name: &str,
        args: &[Value],
        registry: &mut ActionRegistry,
        container: &mut Container,
    ) -> Result<Value> {
        if registry.owns(name) {
            return Ok(registry.execute_action(name, args, container)?);
        }

        let record = self
            .records
            .get(name)
            .ok_or_else(|| StoreError::UndefinedAction(name.to_string()))?;

        debug!(action = name, file = %record.filename, "executing dynamic action");
        let code = std::fs::read_to_string(self.directory.join(&record.filename))?;
        let ast = self
            .engine
            .compile(&code)
            .map_err(|e| StoreError::script(name, e))?;

        let call_args: Vec<Dynamic> = args
            .iter()
            .map(rhai::serde::to_dynamic)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| StoreError::script(name, e))?;

        let mut scope = Scope::new();
        let result: Dynamic = self
            .engine
            .call_fn(&mut scope, &ast, &record.func_name, call_args)
            .map_err(|e| StoreError::script(name, e))?;

        rhai::serde::from_dynamic(&result).map_err(|e| StoreError::script(name, e))
    }

    /// Remove a dynamic action
    ///
    /// Deletes the backing file (idempotent when already absent) and the
    /// index record. Unknown names are a warning, not an error.
    pub fn remove_action(&mut self, name: &str) -> Result<()> {
        match self.records.remove(name) {
            Some(record) => {
                let path = self.directory.join(&record.filename);
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
                self.save_index()?;
                info!(action = name, "dynamic action removed");
            }
            None => warn!(action = name, "dynamic action not found"),
        }
        Ok(())
    }

    /// Names of all persisted actions, sorted
    pub fn actions(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Check whether a persisted record exists for a name
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Persisted record for a name, if any
    pub fn record(&self, name: &str) -> Option<&ActionRecord> {
        self.records.get(name)
    }

    /// The store directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn save_index(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.index_path, json)?;
        Ok(())
    }
}

/// Build the script engine with the store's safety limits
fn build_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_expr_depths(25, 10);
    engine.set_max_operations(100_000);
    engine.set_max_string_size(1024 * 1024);
    engine.set_max_array_size(10_000);
    engine.set_max_map_size(10_000);
    engine
}

/// First `fn <ident>` declared in the source, if any
fn declared_fn_name(source: &str) -> Option<&str> {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    let mut search = 0;
    while let Some(pos) = source[search..].find("fn") {
        let idx = search + pos;
        let boundary_before =
            idx == 0 || !is_ident(source[..idx].chars().next_back().unwrap_or(' '));
        let after = &source[idx + 2..];
        if boundary_before && after.starts_with(|c: char| c.is_whitespace()) {
            let rest = after.trim_start();
            let end = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
            if end > 0 {
                return Some(&rest[..end]);
            }
        }
        search = idx + 2;
    }
    None
}
