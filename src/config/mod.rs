//! Settings model for tasklock.
//!
//! Deployments that want their cache topology in a file (rather than
//! assembling a [`CacheRegistry`](crate::cache::CacheRegistry) in code)
//! can describe the named cache instances in YAML. Parsing is
//! forward-compatible: unknown fields are preserved, optional fields have
//! sensible defaults, and values are validated before a registry is built.

mod model;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{CacheBackend, CacheSettings, Settings};
