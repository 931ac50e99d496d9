//! Lock acquisition and release protocol for tasklock.
//!
//! A lock is one cache key, claimed with a single atomic set-if-absent and
//! bounded by the cache's per-key expiration. The stored sentinel value is
//! JSON metadata naming the holder, so a contending process's failure
//! diagnostics can say who is in the way.
//!
//! # Acquisition Modes
//!
//! - **Non-blocking** (the default): one attempt; a held key fails
//!   immediately with [`LockError::Busy`](crate::error::LockError::Busy).
//! - **Blocking**: attempts repeat under a doubling backoff until the key
//!   is claimed or the wait budget elapses, then
//!   [`LockError::Timeout`](crate::error::LockError::Timeout). The wait
//!   budget bounds *waiting to acquire*; the TTL bounds *holding*. No
//!   fairness among waiters is promised; first success wins.
//!
//! # RAII Guards
//!
//! An acquired lock is a [`LockGuard`] that deletes its key when dropped,
//! on every exit path including panic unwinds. If deletion fails during
//! drop, a warning is printed but the program does not crash.

mod guard;
mod metadata;
mod operations;


// Re-export public API
pub use guard::LockGuard;
pub use metadata::LockMetadata;
pub use operations::{AcquireMode, acquire};
