//! Echo plugin for the Manifold plugin runtime
//!
//! A small demonstration plugin. It owns two actions:
//!
//! - `echo` — returns its arguments unchanged (a single argument comes back
//!   bare, several come back as an array),
//! - `reverse` — reverses a string argument.
//!
//! It also counts how many times it has been invoked and mirrors the count
//! into the shared container under `echo.invocations`, which makes it a
//! handy smoke test for container writes from plugin code.

use manifold_container::Container;
use manifold_plugin_api::prelude::*;
use serde_json::{json, Value};
use tracing::debug;

const INVOCATION_KEY: &str = "echo.invocations";

/// The echo plugin
#[derive(Debug, Default)]
pub struct EchoPlugin {
    invocations: u64,
    debug: bool,
}

impl EchoPlugin {
    /// Create a new echo plugin
    pub fn new(debug: bool) -> Self {
        Self {
            invocations: 0,
            debug,
        }
    }

    fn echo(&self, args: &[Value]) -> Value {
        match args {
            [] => Value::Null,
            [single] => single.clone(),
            many => Value::Array(many.to_vec()),
        }
    }

    fn reverse(&self, args: &[Value]) -> Result<Value> {
        let text = args
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| PluginError::runtime("reverse expects a string argument"))?;
        Ok(json!(text.chars().rev().collect::<String>()))
    }
}

impl Plugin for EchoPlugin {
    fn name(&self) -> &str {
        "EchoPlugin"
    }

    fn load(&mut self, registrar: &mut dyn ActionRegistrar) -> Result<()> {
        for action in ["echo", "reverse"] {
            if let Some(previous) = registrar.register_action(action) {
                debug!(action, %previous, "took over action");
            }
        }
        Ok(())
    }

    fn execute_action(
        &mut self,
        action: &str,
        args: &[Value],
        container: &mut Container,
    ) -> Result<Value> {
        let result = match action {
            "echo" => Ok(self.echo(args)),
            "reverse" => self.reverse(args),
            other => return Err(PluginError::unknown_local(self.name(), other)),
        };

        self.invocations += 1;
        container.set(INVOCATION_KEY, json!(self.invocations), None)?;
        if self.debug {
            debug!(action, invocations = self.invocations, "echo dispatched");
        }
        result
    }

    fn actions(&self) -> Vec<String> {
        vec!["echo".to_string(), "reverse".to_string()]
    }
}

/// Constructor exported through the plugin declaration
pub fn new_plugin(_container: &mut Container, debug: bool) -> Result<Box<dyn Plugin>> {
    Ok(Box::new(EchoPlugin::new(debug)))
}

manifold_plugin_api::export_plugins! {
    "EchoPlugin" => new_plugin,
}
