//! File-based cache backend.
//!
//! Each key is one file in the backend's directory, created with
//! **create_new** semantics (exclusive create) so that only one process can
//! set an absent key. The expiration deadline is recorded inside the file;
//! an entry past its deadline counts as absent and is replaced in place.

use super::Cache;
use crate::error::{LockError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

/// Characters that survive into a lock filename unchanged.
static UNSAFE_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").expect("valid regex"));

/// On-disk entry: the stored value plus its expiration deadline.
#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    expires_at: DateTime<Utc>,
    value: String,
}

impl FileEntry {
    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A cache backed by exclusive-create lock files in one directory.
///
/// Coordinates processes on the same machine (or a shared filesystem).
/// Keys are sanitized into filenames; two distinct keys that sanitize to
/// the same filename contend for the same lock, which over-serializes but
/// never under-serializes.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Create a backend rooted at `dir`. The directory is created on first
    /// use.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The directory holding this backend's entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let safe = UNSAFE_KEY_CHARS.replace_all(key, "_");
        self.dir.join(format!("{}.lock", safe))
    }

    fn read_entry(&self, path: &Path) -> Option<FileEntry> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Create the entry file exclusively and write its content.
    fn try_create(&self, path: &Path, entry: &FileEntry) -> Result<bool> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(LockError::Cache(format!(
                    "failed to create entry '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let json = serde_json::to_string(entry)
            .map_err(|e| LockError::Cache(format!("failed to serialize entry: {}", e)))?;

        file.write_all(json.as_bytes()).map_err(|e| {
            // Clean up the entry file on write failure
            let _ = fs::remove_file(path);
            LockError::Cache(format!("failed to write entry: {}", e))
        })?;

        file.sync_all().map_err(|e| {
            // Clean up the entry file on sync failure
            let _ = fs::remove_file(path);
            LockError::Cache(format!("failed to sync entry: {}", e))
        })?;

        Ok(true)
    }
}

impl Cache for FileCache {
    fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                LockError::Cache(format!(
                    "failed to create cache directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let path = self.entry_path(key);
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| LockError::Cache(format!("ttl out of range: {}", e)))?;
        let entry = FileEntry {
            expires_at: Utc::now() + ttl,
            value: value.to_string(),
        };

        if self.try_create(&path, &entry)? {
            return Ok(true);
        }

        // The file exists. A live entry means the key is held; an expired
        // or unreadable entry cannot prove ownership and is replaced.
        if let Some(existing) = self.read_entry(&path)
            && !existing.is_expired()
        {
            return Ok(false);
        }

        let _ = fs::remove_file(&path);
        // One retry only: losing this race means another caller holds the key.
        self.try_create(&path, &entry)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        match self.read_entry(&path) {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.value)),
            _ => Ok(None),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LockError::Cache(format!(
                "failed to delete entry '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}
