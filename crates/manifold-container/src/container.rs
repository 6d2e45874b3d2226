//! The shared key/value container

use crate::error::{ContainerError, Result};
use crate::value::ValueKind;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Built-in pseudo-action for reading a key through the dispatch path
pub const BUILTIN_GET: &str = "container_get";

/// Built-in pseudo-action for writing a key through the dispatch path
pub const BUILTIN_SET: &str = "container_set";

/// Shared key/value container
///
/// A flat mapping for the process lifetime: no eviction, no expiry, no
/// namespacing. Reserves the action names [`BUILTIN_GET`] and [`BUILTIN_SET`]
/// so it can be driven through the generic `execute(name, args)` path.
#[derive(Debug, Clone, Default)]
pub struct Container {
    data: HashMap<String, Value>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`
    ///
    /// When `expected` is given and the value does not satisfy it, the call
    /// fails with [`ContainerError::TypeMismatch`] and the entry is not
    /// written.
    pub fn set(&mut self, key: &str, value: Value, expected: Option<ValueKind>) -> Result<()> {
        if let Some(kind) = expected {
            if !kind.matches(&value) {
                return Err(ContainerError::TypeMismatch {
                    key: key.to_string(),
                    expected: kind,
                    actual: ValueKind::of(&value),
                });
            }
        }
        debug!(key, "container set");
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Read the value stored under `key`
    ///
    /// An absent key reads as `Value::Null`. When `expected` is given and the
    /// stored (or absent) value does not satisfy it, the call fails with
    /// [`ContainerError::TypeMismatch`].
    pub fn get(&self, key: &str, expected: Option<ValueKind>) -> Result<Value> {
        let value = self.data.get(key).cloned().unwrap_or(Value::Null);
        if let Some(kind) = expected {
            if !kind.matches(&value) {
                return Err(ContainerError::TypeMismatch {
                    key: key.to_string(),
                    expected: kind,
                    actual: ValueKind::of(&value),
                });
            }
        }
        debug!(key, "container get");
        Ok(value)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the container is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The two reserved built-in action names
    pub fn builtin_actions() -> [&'static str; 2] {
        [BUILTIN_GET, BUILTIN_SET]
    }

    /// Check whether a name is one of the built-in pseudo-actions
    pub fn is_builtin(name: &str) -> bool {
        name == BUILTIN_GET || name == BUILTIN_SET
    }

    /// Answer a built-in pseudo-action
    ///
    /// `container_get` takes `[key, kind?]` and returns the value;
    /// `container_set` takes `[key, value, kind?]` and returns null. The
    /// optional kind is a string (`"null"`, `"bool"`, `"number"`, `"string"`,
    /// `"array"`, `"object"`).
    pub fn dispatch(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        match name {
            BUILTIN_GET => {
                let key = Self::key_arg(name, args)?;
                let expected = Self::kind_arg(name, args.get(1))?;
                self.get(key, expected)
            }
            BUILTIN_SET => {
                let key = Self::key_arg(name, args)?;
                let value = args
                    .get(1)
                    .cloned()
                    .ok_or_else(|| ContainerError::invalid_arguments(name, "missing value"))?;
                let expected = Self::kind_arg(name, args.get(2))?;
                self.set(key, value, expected)?;
                Ok(Value::Null)
            }
            other => Err(ContainerError::UnknownAction(other.to_string())),
        }
    }

    fn key_arg<'a>(action: &str, args: &'a [Value]) -> Result<&'a str> {
        args.first()
            .and_then(Value::as_str)
            .ok_or_else(|| ContainerError::invalid_arguments(action, "missing string key"))
    }

    fn kind_arg(action: &str, arg: Option<&Value>) -> Result<Option<ValueKind>> {
        match arg {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => s.parse().map(Some),
            Some(_) => Err(ContainerError::invalid_arguments(
                action,
                "expected type must be a string",
            )),
        }
    }
}
