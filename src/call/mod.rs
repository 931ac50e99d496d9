//! Call binding for wrapped task functions.
//!
//! Rust has no runtime argument introspection, so the declared shape of a
//! wrapped function is modeled explicitly: a [`Signature`] lists the
//! parameter names (in declaration order) with optional default values, and
//! a [`CallArgs`] carries one invocation's positional and named argument
//! values, in call order. Binding the two produces a [`BoundCall`], the
//! per-invocation view the name-resolution engine reads from.
//!
//! Argument values are `serde_json::Value`: the one dynamic value type used
//! throughout the crate for argument traversal and key rendering.

mod bind;
mod types;


// Re-export public API
pub use bind::BoundCall;
pub use types::{CallArgs, Param, Signature};
