//! In-memory TTL cache
//!
//! Provides:
//! - Process-wide URL -> extracted-text caching with per-entry TTL
//! - Expiry on read: a stale entry is ignored, never served, and simply
//!   overwritten by the next successful write (no background sweeping)
//! - Whole-entry atomic replacement under a write lock, so concurrent
//!   readers either see the previous complete entry or the new one
//!
//! The cache is rebuilt from zero on every process restart; durability is a
//! deployment concern outside this crate.

use crate::metrics;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Default TTL in seconds
    pub default_ttl_secs: u64,
    /// Cache name used in metrics labels
    pub name: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 3600,
            name: "pages".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// In-memory key-value cache with per-entry expiry
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
}

impl TtlCache {
    /// Create a new cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Create a cache with a specific default TTL
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self::new(CacheConfig {
            default_ttl_secs: default_ttl.as_secs(),
            ..CacheConfig::default()
        })
    }

    /// Get a value from the cache. Returns `None` for missing or expired
    /// entries; expired entries are left in place for the next write to
    /// overwrite.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let now = Instant::now();

        match entries.get(key) {
            Some(entry) if entry.is_fresh(now) => {
                debug!(key = %key, chars = entry.value.len(), "Cache hit");
                metrics::record_cache(true, &self.config.name);
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(key = %key, "Cache entry expired");
                metrics::record_cache(false, &self.config.name);
                None
            }
            None => {
                metrics::record_cache(false, &self.config.name);
                None
            }
        }
    }

    /// Store a value with the default TTL, replacing any existing entry as a
    /// whole (value and timestamp together).
    pub async fn put(&self, key: &str, value: String) {
        self.put_with_ttl(key, value, Duration::from_secs(self.config.default_ttl_secs))
            .await;
    }

    /// Store a value with a custom TTL
    pub async fn put_with_ttl(&self, key: &str, value: String, ttl: Duration) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
            ttl,
        };

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache set");
    }

    /// Number of entries currently stored (fresh or stale)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries at all
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
