//! # Manifold Container
//!
//! Flat, typed key/value store shared across the Manifold runtime.
//!
//! The container is a plain `String -> serde_json::Value` mapping with
//! optional type checking: callers may pass a [`ValueKind`] to `get`/`set`
//! and the call fails with [`ContainerError::TypeMismatch`] when the value
//! does not conform. It also answers two built-in pseudo-actions,
//! `container_get` and `container_set`, so it can be driven through the
//! generic action-dispatch path.
//!
//! ## Example
//!
//! ```rust
//! use manifold_container::{Container, ValueKind};
//! use serde_json::json;
//!
//! # fn main() -> manifold_container::Result<()> {
//! let mut container = Container::new();
//! container.set("count", json!(1), Some(ValueKind::Number))?;
//! assert_eq!(container.get("count", Some(ValueKind::Number))?, json!(1));
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

mod container;
mod error;
mod value;

pub use container::{Container, BUILTIN_GET, BUILTIN_SET};
pub use error::{ContainerError, Result};
pub use value::ValueKind;
