//! Debug tracing for tasklock.
//!
//! When a wrapped function enables `debug`, the locking envelope emits
//! structured trace events for the stages of one invocation: name
//! resolution, each acquisition attempt and its result, and release.
//! Events go to an injected [`TraceSink`]; they are observability only,
//! never part of the return contract.
//!
//! # Event Format
//!
//! Each event carries:
//! - `ts`: RFC3339 timestamp
//! - `action`: the stage (name_resolved, acquire_attempt, …)
//! - `key`: the lock key involved
//! - `details`: freeform object with stage-specific details

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Stages of one invocation that can be traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    /// The lock key was resolved from the call's arguments.
    NameResolved,
    /// One set-if-absent attempt is about to run.
    AcquireAttempt,
    /// The lock was acquired.
    Acquired,
    /// Non-blocking acquisition found the key held.
    Busy,
    /// Blocking acquisition exhausted its wait budget.
    TimedOut,
    /// The lock key was deleted.
    Released,
}

impl std::fmt::Display for TraceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceAction::NameResolved => write!(f, "name_resolved"),
            TraceAction::AcquireAttempt => write!(f, "acquire_attempt"),
            TraceAction::Acquired => write!(f, "acquired"),
            TraceAction::Busy => write!(f, "busy"),
            TraceAction::TimedOut => write!(f, "timed_out"),
            TraceAction::Released => write!(f, "released"),
        }
    }
}

/// One trace event, serialized as a single JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The stage this event records.
    pub action: TraceAction,

    /// The lock key involved.
    pub key: String,

    /// Freeform stage-specific details.
    pub details: Value,
}

impl TraceEvent {
    /// Create an event for `action` on `key`, timestamped now.
    pub fn new(action: TraceAction, key: &str) -> Self {
        Self {
            ts: Utc::now(),
            action,
            key: key.to_string(),
            details: Value::Null,
        }
    }

    /// Attach stage-specific details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// Where trace events go.
pub trait TraceSink: Send + Sync {
    /// Record one event. Sinks must not panic on I/O failure; tracing is
    /// best effort.
    fn record(&self, event: &TraceEvent);
}

/// Writes each event as one JSON line to stderr.
#[derive(Debug, Default)]
pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn record(&self, event: &TraceEvent) {
        if let Ok(line) = serde_json::to_string(event) {
            eprintln!("{}", line);
        }
    }
}

/// Appends each event as one JSON line to an NDJSON file.
#[derive(Debug)]
pub struct FileTrace {
    path: PathBuf,
}

impl FileTrace {
    /// Trace into the NDJSON file at `path`. The file is created on first
    /// write; parent directories must exist.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink appends to.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TraceSink for FileTrace {
    fn record(&self, event: &TraceEvent) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path);
        if let Ok(mut file) = file {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// Collects events in memory, for tests and embedders that inspect traces.
#[derive(Debug, Default)]
pub struct MemoryTrace {
    events: Mutex<Vec<TraceEvent>>,
}

impl MemoryTrace {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in order.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// The actions recorded so far, in order.
    pub fn actions(&self) -> Vec<TraceAction> {
        self.events().iter().map(|e| e.action).collect()
    }
}

impl TraceSink for MemoryTrace {
    fn record(&self, event: &TraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_serializes_with_snake_case_action() {
        let event = TraceEvent::new(TraceAction::AcquireAttempt, "job:1")
            .with_details(json!({"attempt": 1}));
        let line = serde_json::to_string(&event).unwrap();

        assert!(line.contains("\"acquire_attempt\""));
        assert!(line.contains("\"job:1\""));
        assert!(line.contains("\"attempt\":1"));

        let parsed: TraceEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.action, TraceAction::AcquireAttempt);
    }

    #[test]
    fn action_display_matches_serde_form() {
        assert_eq!(TraceAction::NameResolved.to_string(), "name_resolved");
        assert_eq!(TraceAction::TimedOut.to_string(), "timed_out");
    }

    #[test]
    fn memory_trace_records_in_order() {
        let sink = MemoryTrace::new();
        sink.record(&TraceEvent::new(TraceAction::NameResolved, "k"));
        sink.record(&TraceEvent::new(TraceAction::Acquired, "k"));
        sink.record(&TraceEvent::new(TraceAction::Released, "k"));

        assert_eq!(
            sink.actions(),
            vec![
                TraceAction::NameResolved,
                TraceAction::Acquired,
                TraceAction::Released
            ]
        );
    }

    #[test]
    fn file_trace_appends_one_line_per_event() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trace.ndjson");
        let sink = FileTrace::new(&path);

        sink.record(&TraceEvent::new(TraceAction::Acquired, "a"));
        sink.record(&TraceEvent::new(TraceAction::Released, "a"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let _: TraceEvent = serde_json::from_str(line).unwrap();
        }
    }
}
