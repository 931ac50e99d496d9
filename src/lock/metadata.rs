//! Holder metadata stored as the lock's sentinel value.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing the current holder of a lock.
///
/// Serialized as the cache value under the lock key, so any process that
/// finds the key held can report who holds it and for how long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `worker@HOST`).
    pub owner: String,

    /// Process ID of the lock holder (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when the lock was acquired (RFC3339).
    pub acquired_at: DateTime<Utc>,
}

impl LockMetadata {
    /// Create metadata for this process, timestamped now.
    pub fn new() -> Self {
        Self {
            owner: owner_string(),
            pid: Some(std::process::id()),
            acquired_at: Utc::now(),
        }
    }

    /// Parse metadata from a sentinel value read back from the cache.
    pub fn from_json(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok()
    }

    /// Serialize metadata to the sentinel JSON string.
    pub fn to_json(&self) -> String {
        // Serialization of a plain struct with these field types cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// How long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();

        if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds.max(0))
        }
    }

    /// One-line holder description for busy-lock diagnostics.
    pub fn describe(&self) -> String {
        format!("{} (held for {})", self.owner, self.age_string())
    }
}

impl Default for LockMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the owner string for lock metadata.
fn owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
