//! Error types for tasklock.
//!
//! Uses thiserror for derive macros. Locking failures are always surfaced
//! to the caller; name-resolution failures never are (they degrade to empty
//! key fragments inside the resolution engine).

use std::time::Duration;
use thiserror::Error;

/// Main error type for lock operations.
///
/// `Busy` and `Timeout` are deliberately distinct variants so callers can
/// tell "the lock was held and no wait was attempted" apart from "waited
/// and gave up".
#[derive(Error, Debug)]
pub enum LockError {
    /// Non-blocking acquisition found the key already held.
    ///
    /// `holder` describes the current owner when its metadata could be
    /// read back from the cache, and is `"another owner"` otherwise.
    #[error("lock '{key}' is already held by {holder}")]
    Busy { key: String, holder: String },

    /// Blocking acquisition exhausted its wait budget.
    #[error("timed out after {waited:?} waiting for lock '{key}'")]
    Timeout { key: String, waited: Duration },

    /// The requested cache name is not present in the registry.
    #[error("unknown cache '{0}'")]
    UnknownCache(String),

    /// The cache backend failed (I/O, poisoned state, etc.).
    #[error("cache operation failed: {0}")]
    Cache(String),

    /// Settings file could not be parsed or failed validation.
    #[error("invalid settings: {0}")]
    Settings(String),
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

/// Error envelope returned by [`LockedTask::call`](crate::task::LockedTask::call).
///
/// Keeps the locking envelope's failures separate from the wrapped task's
/// own failure type `E`, which passes through unchanged.
#[derive(Error, Debug)]
pub enum CallError<E> {
    /// Acquisition (or cache lookup) failed; the task was never invoked.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// The task itself failed. The lock was still released first.
    #[error(transparent)]
    Task(E),
}

impl<E> CallError<E> {
    /// True if the call failed because the lock was held (non-blocking mode).
    pub fn is_busy(&self) -> bool {
        matches!(self, CallError::Lock(LockError::Busy { .. }))
    }

    /// True if the call failed because the wait budget elapsed (blocking mode).
    pub fn is_timeout(&self) -> bool {
        matches!(self, CallError::Lock(LockError::Timeout { .. }))
    }
}
