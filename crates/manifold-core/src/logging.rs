//! Logging setup
//!
//! Thin wrapper over `tracing-subscriber`. Embedders that configure their own
//! subscriber can skip this entirely.

use tracing_subscriber::EnvFilter;

/// Initialize a global `tracing` subscriber
///
/// `RUST_LOG` takes precedence when set; otherwise the debug flag picks
/// between `debug` and `info`. Safe to call more than once — later calls are
/// no-ops.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
