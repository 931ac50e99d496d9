//! Named cache instances.

use super::{Cache, MemoryCache};
use crate::error::{LockError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the cache used when a wrapped function does not pick one.
pub const DEFAULT_CACHE: &str = "default";

/// A set of named cache instances, selectable per wrapped function.
///
/// The registry is plain data handed to
/// [`LockedTask::call`](crate::task::LockedTask::call), deliberately not
/// a global, so tests and embedders control exactly which instances exist.
#[derive(Clone, Default)]
pub struct CacheRegistry {
    caches: BTreeMap<String, Arc<dyn Cache>>,
}

impl CacheRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose `"default"` cache is a fresh [`MemoryCache`].
    pub fn with_default_memory() -> Self {
        let mut registry = Self::new();
        registry.insert(DEFAULT_CACHE, Arc::new(MemoryCache::new()));
        registry
    }

    /// Register `cache` under `name`, replacing any previous instance.
    pub fn insert(&mut self, name: &str, cache: Arc<dyn Cache>) {
        self.caches.insert(name.to_string(), cache);
    }

    /// Look up a cache by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Cache>> {
        self.caches
            .get(name)
            .cloned()
            .ok_or_else(|| LockError::UnknownCache(name.to_string()))
    }

    /// Registered cache names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.caches.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("names", &self.names())
            .finish()
    }
}
