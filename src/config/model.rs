//! The Settings struct and cache declarations.

use crate::cache::{CacheRegistry, DEFAULT_CACHE, FileCache, MemoryCache};
use crate::error::{LockError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

/// Valid cache names: the same charset lock keys are sanitized to.
static CACHE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid regex"));

/// Which backend a declared cache uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    /// In-process map (default). Coordinates threads, not processes.
    #[default]
    Memory,
    /// Lock files in a shared directory. Coordinates processes.
    File,
}

/// Declaration of one named cache instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Backend kind.
    pub backend: CacheBackend,

    /// Directory for the file backend. Required when `backend: file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Top-level settings: the named cache instances available to wrapped
/// functions.
///
/// ```yaml
/// caches:
///   default:
///     backend: memory
///   reports:
///     backend: file
///     dir: /var/lib/app/locks
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cache declarations by name.
    pub caches: BTreeMap<String, CacheSettings>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Settings {
    /// Parse and validate settings from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)
            .map_err(|e| LockError::Settings(format!("failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LockError::Settings(format!(
                "failed to read settings file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Validate cache names and per-backend requirements.
    pub fn validate(&self) -> Result<()> {
        for (name, cache) in &self.caches {
            if !CACHE_NAME.is_match(name) {
                return Err(LockError::Settings(format!(
                    "invalid cache name '{}': only letters, digits, '_', '.', '-' are allowed",
                    name
                )));
            }
            if cache.backend == CacheBackend::File && cache.dir.is_none() {
                return Err(LockError::Settings(format!(
                    "cache '{}' uses the file backend but declares no dir",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Build a [`CacheRegistry`] from these settings.
    ///
    /// A `"default"` memory cache is supplied when the settings do not
    /// declare one, so every wrapped function has somewhere to lock.
    pub fn build_registry(&self) -> Result<CacheRegistry> {
        self.validate()?;

        let mut registry = CacheRegistry::new();
        for (name, cache) in &self.caches {
            match cache.backend {
                CacheBackend::Memory => {
                    registry.insert(name, Arc::new(MemoryCache::new()));
                }
                CacheBackend::File => {
                    let dir = cache.dir.as_ref().ok_or_else(|| {
                        LockError::Settings(format!(
                            "cache '{}' uses the file backend but declares no dir",
                            name
                        ))
                    })?;
                    registry.insert(name, Arc::new(FileCache::new(dir)));
                }
            }
        }

        if !self.caches.contains_key(DEFAULT_CACHE) {
            registry.insert(DEFAULT_CACHE, Arc::new(MemoryCache::new()));
        }

        Ok(registry)
    }
}
