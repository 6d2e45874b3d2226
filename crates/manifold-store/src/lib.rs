//! # Manifold Action Store
//!
//! Secondary, file-backed action path: callers register a standalone script
//! function as a named action without writing a plugin. Each action is one
//! generated `.rhai` file in the store directory plus a record in a JSON
//! index; dispatch always gives the live registry priority, and the backing
//! file is compiled fresh on every call.
//!
//! Scripts run inside a rhai engine with depth, operation and size limits —
//! late-bound code never loads in-process with full privileges.
//!
//! ## Example
//!
//! ```rust,no_run
//! use manifold_store::ActionStore;
//!
//! # fn main() -> manifold_store::Result<()> {
//! let mut store = ActionStore::open("data/actions")?;
//! store.add_action("double", "fn double(x) { x * 2 }", None)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{ActionRecord, ActionStore, INDEX_FILE};
