//! Flat-file documentation cache
//!
//! Provides:
//! - One JSON artifact per (platform, identifier) key
//! - A `{timestamp, data}` envelope with time-based expiry
//! - Cache key helpers for task and free-text search identifiers
//!
//! Disabled by default: the machinery exists but every call is a no-op
//! until an extractor is constructed with caching turned on. Artifacts are
//! disposable and may be deleted at any time; corrupt or unreadable
//! entries are treated as absent. No locking is taken, so concurrent
//! writers to one key can race (single-threaded, low-frequency use).

use crate::model::Platform;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flat-file cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Whether reads and writes do anything at all
    #[serde(default)]
    pub enabled: bool,

    /// Directory holding one JSON file per cache key
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// Entries older than this many seconds are treated as absent
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_ttl_secs() -> u64 {
    crate::CACHE_TTL_SECS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_cache_dir(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// On-disk envelope: epoch-second timestamp plus the cached payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub timestamp: i64,
    pub data: T,
}

/// Flat-file cache client
#[derive(Debug, Clone)]
pub struct FileCache {
    config: CacheConfig,
}

impl FileCache {
    /// Create a new cache client
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Create a cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(CacheConfig::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Path of the artifact for a given key
    fn entry_path(&self, platform: Platform, identifier: &str) -> PathBuf {
        self.config
            .dir
            .join(format!("{}_{}.json", platform.as_str(), identifier))
    }

    /// Get a cached value if caching is enabled and the entry is fresh.
    ///
    /// Does not distinguish "never cached" from "expired": both are absent.
    pub fn get<T: DeserializeOwned>(&self, platform: Platform, identifier: &str) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        let path = self.entry_path(platform, identifier);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!(platform = %platform, identifier, "Cache miss");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding corrupt cache entry");
                return None;
            }
        };

        let age = Utc::now().timestamp().saturating_sub(entry.timestamp);
        if age < 0 || (age as u64) >= self.config.ttl_secs {
            info!(platform = %platform, identifier, age_secs = age, "Cache entry expired");
            return None;
        }

        debug!(platform = %platform, identifier, "Cache hit");
        Some(entry.data)
    }

    /// Store a value under the key, overwriting any prior entry.
    ///
    /// No-op when caching is disabled. Write failures are logged, never
    /// fatal.
    pub fn set<T: Serialize>(&self, platform: Platform, identifier: &str, value: &T) {
        if !self.config.enabled {
            return;
        }

        if let Err(e) = fs::create_dir_all(&self.config.dir) {
            warn!(dir = %self.config.dir.display(), error = %e, "Failed to create cache directory");
            return;
        }

        let entry = CacheEntry {
            timestamp: Utc::now().timestamp(),
            data: value,
        };

        let path = self.entry_path(platform, identifier);
        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!(path = %path.display(), error = %e, "Failed to write cache entry");
                } else {
                    debug!(platform = %platform, identifier, "Cache set");
                }
            }
            Err(e) => warn!(identifier, error = %e, "Failed to serialize cache entry"),
        }
    }

    /// Remove one entry
    pub fn remove(&self, platform: Platform, identifier: &str) {
        let path = self.entry_path(platform, identifier);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "Failed to remove cache entry");
            } else {
                info!(platform = %platform, identifier, "Cleared cache entry");
            }
        }
    }

    /// Remove every entry for one platform, or every entry in the
    /// directory when no platform is given
    pub fn clear(&self, platform: Option<Platform>) {
        let Ok(dir) = fs::read_dir(&self.config.dir) else {
            return;
        };
        let prefix = platform.map(|p| format!("{}_", p.as_str()));

        for file in dir.flatten() {
            let name = file.file_name();
            let name = name.to_string_lossy();
            let matches = match &prefix {
                Some(prefix) => name.starts_with(prefix.as_str()),
                None => true,
            };
            if matches && is_cache_file(&file.path()) {
                if let Err(e) = fs::remove_file(file.path()) {
                    warn!(path = %file.path().display(), error = %e, "Failed to delete cache file");
                } else {
                    debug!(file = %name, "Deleted cache file");
                }
            }
        }
        info!(platform = ?platform.map(|p| p.as_str()), "Cleared cache");
    }
}

fn is_cache_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// Cache key builder helpers
pub mod keys {
    use crate::model::Task;
    use sha2::{Digest, Sha256};

    /// Identifier for a task extraction result
    pub fn task(task: Task) -> String {
        task.as_str().to_string()
    }

    /// Identifier for a free-text search result, keyed by a hash of the
    /// query string
    pub fn search(query: &str) -> String {
        let digest = Sha256::digest(query.as_bytes());
        format!("search_{}", &hex::encode(digest)[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn enabled_cache(dir: &TempDir) -> FileCache {
        FileCache::new(CacheConfig {
            enabled: true,
            dir: dir.path().to_path_buf(),
            ttl_secs: crate::CACHE_TTL_SECS,
        })
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);

        cache.set(Platform::Segment, "source_setup", &vec!["a".to_string()]);
        let got: Option<Vec<String>> = cache.get(Platform::Segment, "source_setup");
        assert_eq!(got, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = FileCache::disabled();
        cache.set(Platform::Lytics, "source_setup", &vec![1, 2, 3]);
        let got: Option<Vec<i32>> = cache.get(Platform::Lytics, "source_setup");
        assert!(got.is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);
        let path = dir.path().join("zeotap_source_setup.json");

        let write_with_age = |age: i64| {
            let entry = CacheEntry {
                timestamp: Utc::now().timestamp() - age,
                data: vec!["x".to_string()],
            };
            fs::write(&path, serde_json::to_string(&entry).unwrap()).unwrap();
        };

        write_with_age(86_399);
        let fresh: Option<Vec<String>> = cache.get(Platform::Zeotap, "source_setup");
        assert!(fresh.is_some());

        write_with_age(86_401);
        let stale: Option<Vec<String>> = cache.get(Platform::Zeotap, "source_setup");
        assert!(stale.is_none());
    }

    #[test]
    fn test_corrupt_entry_is_absent() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);
        fs::write(dir.path().join("segment_source_setup.json"), "{not json").unwrap();

        let got: Option<Vec<String>> = cache.get(Platform::Segment, "source_setup");
        assert!(got.is_none());
    }

    #[test]
    fn test_overwrite_replaces_prior_entry() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);

        cache.set(Platform::Segment, "data_integration", &vec![1]);
        cache.set(Platform::Segment, "data_integration", &vec![2]);
        let got: Option<Vec<i32>> = cache.get(Platform::Segment, "data_integration");
        assert_eq!(got, Some(vec![2]));
    }

    #[test]
    fn test_clear_single_platform() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);

        cache.set(Platform::Segment, "source_setup", &1);
        cache.set(Platform::Lytics, "source_setup", &2);
        cache.clear(Some(Platform::Segment));

        let segment: Option<i32> = cache.get(Platform::Segment, "source_setup");
        let lytics: Option<i32> = cache.get(Platform::Lytics, "source_setup");
        assert!(segment.is_none());
        assert_eq!(lytics, Some(2));
    }

    #[test]
    fn test_clear_all() {
        let dir = TempDir::new().unwrap();
        let cache = enabled_cache(&dir);

        cache.set(Platform::Segment, "source_setup", &1);
        cache.set(Platform::Zeotap, "profile_creation", &2);
        cache.clear(None);

        let a: Option<i32> = cache.get(Platform::Segment, "source_setup");
        let b: Option<i32> = cache.get(Platform::Zeotap, "profile_creation");
        assert!(a.is_none());
        assert!(b.is_none());
    }

    #[test]
    fn test_search_key_is_stable() {
        assert_eq!(keys::search("identity resolution"), keys::search("identity resolution"));
        assert_ne!(keys::search("identity"), keys::search("resolution"));
        assert!(keys::search("x").starts_with("search_"));
    }
}
