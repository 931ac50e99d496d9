//! In-memory cache backend.

use super::Cache;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// A mutex-guarded in-process key-value map with deadline expiry.
///
/// Expired entries are purged lazily, on the next operation that touches
/// their key. The mutex makes `set_if_absent` atomic across threads
/// sharing the instance.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        // A panicking lock holder leaves the map itself intact.
        self.entries
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Cache for MemoryCache {
    fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut entries = self.lock_entries();
        let now = Instant::now();

        if let Some(entry) = entries.get(key)
            && entry.expires_at > now
        {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.lock_entries();
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock_entries().remove(key);
        Ok(())
    }
}
