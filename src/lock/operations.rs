//! Lock acquisition against the cache collaborator.

use super::guard::LockGuard;
use super::metadata::LockMetadata;
use crate::cache::Cache;
use crate::error::{LockError, Result};
use crate::trace::{TraceAction, TraceEvent, TraceSink};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// First sleep between blocking attempts.
const INITIAL_BACKOFF: Duration = Duration::from_millis(50);

/// Ceiling on the sleep between blocking attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(1);

/// Whether a held key fails the acquisition or is waited out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireMode {
    /// One attempt; a held key fails with `LockError::Busy`.
    NonBlocking,

    /// Retry under backoff until acquired or `wait_budget` elapses, then
    /// fail with `LockError::Timeout`.
    Blocking { wait_budget: Duration },
}

/// Acquire the lock `key` against `cache`.
///
/// Each attempt is one atomic set-if-absent of this process's
/// [`LockMetadata`] sentinel with expiration `ttl`. The returned guard
/// deletes the key when dropped.
///
/// Blocking mode sleeps between attempts, doubling from 50 ms to a 1 s
/// cap, and never sleeps past the wait budget. Among concurrent waiters
/// the first successful attempt wins; there is no queue.
pub fn acquire(
    cache: &Arc<dyn Cache>,
    key: &str,
    ttl: Duration,
    mode: AcquireMode,
    trace: Option<&Arc<dyn TraceSink>>,
) -> Result<LockGuard> {
    let sentinel = LockMetadata::new().to_json();
    let started = Instant::now();
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt: u32 = 1;

    loop {
        if let Some(sink) = trace {
            sink.record(
                &TraceEvent::new(TraceAction::AcquireAttempt, key)
                    .with_details(json!({"attempt": attempt})),
            );
        }

        if cache.set_if_absent(key, &sentinel, ttl)? {
            if let Some(sink) = trace {
                sink.record(
                    &TraceEvent::new(TraceAction::Acquired, key)
                        .with_details(json!({"attempts": attempt})),
                );
            }
            return Ok(LockGuard::new(Arc::clone(cache), key.to_string(), trace.cloned()));
        }

        match mode {
            AcquireMode::NonBlocking => {
                if let Some(sink) = trace {
                    sink.record(&TraceEvent::new(TraceAction::Busy, key));
                }
                return Err(LockError::Busy {
                    key: key.to_string(),
                    holder: holder_description(cache, key),
                });
            }
            AcquireMode::Blocking { wait_budget } => {
                let elapsed = started.elapsed();
                if elapsed >= wait_budget {
                    if let Some(sink) = trace {
                        sink.record(
                            &TraceEvent::new(TraceAction::TimedOut, key)
                                .with_details(json!({"attempts": attempt})),
                        );
                    }
                    return Err(LockError::Timeout {
                        key: key.to_string(),
                        waited: elapsed,
                    });
                }

                // Never sleep past the budget; the final attempt runs right
                // at the deadline.
                std::thread::sleep(backoff.min(wait_budget - elapsed));
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }

        attempt += 1;
    }
}

/// Describe the current holder of `key` for a busy-lock error, falling
/// back to a generic description when the sentinel cannot be read back.
fn holder_description(cache: &Arc<dyn Cache>, key: &str) -> String {
    cache
        .get(key)
        .ok()
        .flatten()
        .and_then(|value| LockMetadata::from_json(&value))
        .map(|meta| meta.describe())
        .unwrap_or_else(|| "another owner".to_string())
}
