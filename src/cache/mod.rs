//! Cache collaborator for tasklock.
//!
//! All lock coordination happens through a shared key-value cache exposing
//! atomic set-if-absent and delete with per-key expiration. The cache is an
//! injected collaborator behind the [`Cache`] trait, never a process-wide
//! singleton, so tests and deployments can swap backends freely.
//!
//! Two backends ship with the crate:
//! - [`MemoryCache`]: a mutex-guarded in-process map with deadline expiry.
//!   Coordinates threads sharing the instance, and doubles as the test
//!   substitute for a networked cache.
//! - [`FileCache`]: lock files created with exclusive-create semantics and
//!   expired by a deadline recorded in the file. Coordinates processes
//!   sharing a directory.
//!
//! Named instances live in a [`CacheRegistry`]; each wrapped function
//! selects its cache by name. Processes sharing a cache instance cooperate;
//! processes using different instances do not coordinate at all, which is a
//! caller responsibility.

mod file;
mod memory;
mod registry;


// Re-export public API
pub use file::FileCache;
pub use memory::MemoryCache;
pub use registry::{CacheRegistry, DEFAULT_CACHE};

use crate::error::Result;
use std::time::Duration;

/// Atomic key-value operations required for lock coordination.
///
/// `set_if_absent` must be atomic with respect to concurrent callers of the
/// same instance: at most one of N racing calls for an absent key may
/// return `true`.
pub trait Cache: Send + Sync {
    /// Set `key` to `value` with expiration `ttl`, only if the key is
    /// absent (or expired). Returns `true` if the value was set.
    fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Read the current value of `key`, if present and not expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key`. Deleting an absent or expired key is a no-op.
    fn delete(&self, key: &str) -> Result<()>;
}

impl std::fmt::Debug for dyn Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Cache")
    }
}
