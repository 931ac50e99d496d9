//! Lock-name resolution for tasklock.
//!
//! This module derives the lock key for one invocation from the call's
//! bound arguments, according to the wrapped function's [`LockName`]:
//!
//! - **Auto**: every argument value with a meaningful textual form, joined
//!   in call order (the "just works" default).
//! - **Literal**: a fixed string.
//! - **Selectors**: an ordered list of declarative [`Selector`]s, each
//!   contributing exactly one key fragment: a plain parameter, a nested
//!   attribute/index path, or a priority list picking the first truthy
//!   parameter.
//!
//! Resolution never fails: a selector that cannot be resolved contributes
//! an empty fragment, so a misconfigured selector degrades the key instead
//! of crashing an otherwise-working task.

mod path;
mod resolve;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use resolve::resolve_lock_key;
pub use types::{LockName, Selector, Step};
