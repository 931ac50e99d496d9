//! The locking envelope around a task function.
//!
//! A [`LockedTask`] pairs a task closure with its declared [`Signature`]
//! and per-function [`LockOptions`]. Each call binds the arguments,
//! resolves the lock key, acquires the lock against the selected cache,
//! invokes the closure with the lock held, and releases on every exit
//! path: normal return, failure return, and panic unwind.
//!
//! The envelope adds nothing else: the closure's return value and failure
//! semantics pass through unchanged, and a busy or timed-out lock is
//! surfaced as [`CallError::Lock`] without the closure ever running.

use crate::call::{BoundCall, CallArgs, Signature};
use crate::cache::{CacheRegistry, DEFAULT_CACHE};
use crate::error::CallError;
use crate::lock::{AcquireMode, acquire};
use crate::name::{LockName, resolve_lock_key};
use crate::trace::{StderrTrace, TraceAction, TraceEvent, TraceSink};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Per-function locking configuration.
///
/// Built once at wrapping time and read on every call.
#[derive(Debug, Clone)]
pub struct LockOptions {
    /// How the lock key is derived (default: auto-generate from the
    /// call's argument values).
    pub name: LockName,

    /// Lock expiration ceiling: how long a *held* lock survives in the
    /// cache (default 60 s).
    pub timeout: Duration,

    /// Retry-until-acquired instead of failing fast (default false).
    pub blocking: bool,

    /// Blocking-mode bound on how long the caller *waits to acquire*.
    /// `None` means "same as `timeout`".
    pub wait_budget: Option<Duration>,

    /// Which registered cache instance to lock against (default
    /// `"default"`).
    pub cache: String,

    /// Emit trace events for name resolution, acquisition, and release
    /// (default false).
    pub debug: bool,

    /// Release the lock when the call's scope exits (default true).
    /// When false the key is deliberately left to expire on its own TTL,
    /// giving at-most-once-per-window semantics.
    pub release_on_completion: bool,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            name: LockName::Auto,
            timeout: Duration::from_secs(60),
            blocking: false,
            wait_budget: None,
            cache: DEFAULT_CACHE.to_string(),
            debug: false,
            release_on_completion: true,
        }
    }
}

impl LockOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how the lock key is derived.
    pub fn name(mut self, name: LockName) -> Self {
        self.name = name;
        self
    }

    /// Set the lock expiration ceiling.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable blocking acquisition.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// Bound the blocking-mode wait independently of the TTL.
    pub fn wait_budget(mut self, budget: Duration) -> Self {
        self.wait_budget = Some(budget);
        self
    }

    /// Select the cache instance by name.
    pub fn cache(mut self, name: &str) -> Self {
        self.cache = name.to_string();
        self
    }

    /// Enable or disable debug tracing.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Control whether the lock is released when the call completes.
    pub fn release_on_completion(mut self, release: bool) -> Self {
        self.release_on_completion = release;
        self
    }

    fn acquire_mode(&self) -> AcquireMode {
        if self.blocking {
            AcquireMode::Blocking {
                wait_budget: self.wait_budget.unwrap_or(self.timeout),
            }
        } else {
            AcquireMode::NonBlocking
        }
    }
}

/// A task function wrapped in the locking envelope.
///
/// The closure receives the [`BoundCall`] so it can read its arguments by
/// name; its `Result` passes through [`call`](LockedTask::call) unchanged,
/// wrapped only to keep locking failures distinguishable.
pub struct LockedTask<F> {
    function: String,
    signature: Signature,
    options: LockOptions,
    trace: Arc<dyn TraceSink>,
    func: F,
}

impl<F, T, E> LockedTask<F>
where
    F: Fn(&BoundCall) -> std::result::Result<T, E>,
{
    /// Wrap `func` under `function`'s name with the given signature and
    /// options. Debug traces go to stderr unless a sink is injected with
    /// [`with_trace`](LockedTask::with_trace).
    pub fn new(function: &str, signature: Signature, options: LockOptions, func: F) -> Self {
        Self {
            function: function.to_string(),
            signature,
            options,
            trace: Arc::new(StderrTrace),
            func,
        }
    }

    /// Replace the trace sink.
    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = trace;
        self
    }

    /// The wrapped function's name (the first segment of every lock key).
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The locking configuration.
    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// Run one invocation under the lock.
    ///
    /// Binds `args`, resolves the lock key, and acquires the lock from
    /// the registry's selected cache. On `Busy` or `Timeout` the closure
    /// is never invoked. On success the closure runs with the lock held;
    /// release fires on normal return, failure return, and panic unwind.
    pub fn call(
        &self,
        caches: &CacheRegistry,
        args: CallArgs,
    ) -> std::result::Result<T, CallError<E>> {
        let bound = self.signature.bind(args);
        let key = resolve_lock_key(&self.function, &self.options.name, &bound);

        let trace = self.options.debug.then_some(&self.trace);
        if let Some(sink) = trace {
            sink.record(
                &TraceEvent::new(TraceAction::NameResolved, &key)
                    .with_details(json!({"function": self.function, "cache": self.options.cache})),
            );
        }

        let cache = caches.get(&self.options.cache)?;
        let guard = acquire(
            &cache,
            &key,
            self.options.timeout,
            self.options.acquire_mode(),
            trace,
        )?;

        if !self.options.release_on_completion {
            // The key deliberately outlives the call and expires via TTL.
            guard.keep_until_expiry();
            return (self.func)(&bound).map_err(CallError::Task);
        }

        // Guard held across the invocation: dropped on return and unwind.
        let result = (self.func)(&bound);
        drop(guard);
        result.map_err(CallError::Task)
    }
}

impl<F> std::fmt::Debug for LockedTask<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockedTask")
            .field("function", &self.function)
            .field("options", &self.options)
            .finish()
    }
}
