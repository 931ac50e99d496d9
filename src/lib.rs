//! Tasklock: cache-coordinated task locks with declarative lock-name
//! resolution.
//!
//! Background-task frameworks routinely run the same function from many
//! workers at once. Tasklock wraps such a function in a locking envelope:
//! before the function runs, a named lock is acquired against a shared
//! key-value cache (atomic set-if-absent with a TTL); when the call's
//! scope exits (normal return, failure, or panic), the lock is released.
//!
//! The lock key is derived from the call's arguments, either automatically
//! (every argument value with a meaningful textual form) or through a
//! declarative selector list: plain parameters, nested attribute/index
//! paths, and priority fallbacks. See [`name`] for the resolution rules.
//!
//! Coordination is exactly as wide as the cache: workers sharing a cache
//! instance exclude each other, workers on different instances do not.
//! There are no fencing tokens and no lease renewal: this is a task
//! dedup/serialization tool, not a consensus system.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tasklock::{
//!     BoundCall, CacheRegistry, CallArgs, LockName, LockOptions, LockedTask, Selector,
//!     Signature,
//! };
//!
//! let caches = CacheRegistry::with_default_memory();
//!
//! // Lock refresh_feed per feed: concurrent calls for the same feed are
//! // mutually exclusive, different feeds proceed in parallel.
//! let refresh_feed = LockedTask::new(
//!     "refresh_feed",
//!     Signature::new().param("feed_id").param_with_default("page", 1),
//!     LockOptions::new()
//!         .name(LockName::selectors([Selector::param("feed_id")]))
//!         .timeout(Duration::from_secs(30)),
//!     |call: &BoundCall| -> Result<u64, std::io::Error> {
//!         let feed_id = call.value("feed_id").and_then(|v| v.as_u64()).unwrap_or(0);
//!         Ok(feed_id)
//!     },
//! );
//!
//! let value = refresh_feed.call(&caches, CallArgs::new().arg(7)).unwrap();
//! assert_eq!(value, 7);
//! ```

pub mod cache;
pub mod call;
pub mod config;
pub mod error;
pub mod lock;
pub mod name;
pub mod task;
pub mod trace;

pub use cache::{Cache, CacheRegistry, DEFAULT_CACHE, FileCache, MemoryCache};
pub use call::{BoundCall, CallArgs, Param, Signature};
pub use config::Settings;
pub use error::{CallError, LockError, Result};
pub use lock::{AcquireMode, LockGuard, LockMetadata, acquire};
pub use name::{LockName, Selector, Step, resolve_lock_key};
pub use task::{LockOptions, LockedTask};
pub use trace::{FileTrace, MemoryTrace, StderrTrace, TraceSink};
