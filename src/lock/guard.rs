//! RAII lock guard implementation.

use crate::cache::Cache;
use crate::error::Result;
use crate::trace::{TraceAction, TraceEvent, TraceSink};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// An acquired lock.
///
/// When dropped, the lock key is deleted from the cache, on normal
/// return, early return, and panic unwind alike. If deletion fails during
/// drop, a warning is printed but no panic occurs.
pub struct LockGuard {
    cache: Arc<dyn Cache>,
    key: String,
    acquired_at: DateTime<Utc>,
    trace: Option<Arc<dyn TraceSink>>,

    /// Whether the key has already been released (or deliberately kept).
    released: bool,
}

impl LockGuard {
    pub(super) fn new(
        cache: Arc<dyn Cache>,
        key: String,
        trace: Option<Arc<dyn TraceSink>>,
    ) -> Self {
        Self {
            cache,
            key,
            acquired_at: Utc::now(),
            trace,
            released: false,
        }
    }

    /// The lock key this guard holds.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// When the lock was acquired.
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    /// Manually release the lock.
    ///
    /// This is useful when you want to release before the guard goes out
    /// of scope and handle errors explicitly. Releasing an already-expired
    /// or already-deleted key is a no-op, never an error.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        let result = self.cache.delete(&self.key);
        if result.is_ok() {
            self.record_released();
        }
        result
    }

    /// Leave the key in the cache to expire on its own TTL.
    ///
    /// Used by wrapped functions configured to hold their lock for the
    /// full expiration window (at-most-once-per-window semantics).
    pub fn keep_until_expiry(mut self) {
        self.released = true;
    }

    fn record_released(&self) {
        if let Some(trace) = &self.trace {
            trace.record(&TraceEvent::new(TraceAction::Released, &self.key));
        }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("key", &self.key)
            .field("acquired_at", &self.acquired_at)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released {
            match self.cache.delete(&self.key) {
                Ok(()) => self.record_released(),
                Err(e) => eprintln!("Warning: failed to release lock '{}': {}", self.key, e),
            }
        }
    }
}
