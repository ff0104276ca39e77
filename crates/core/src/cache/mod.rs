//! In-memory TTL cache for serving-path video lists.
//!
//! The key space is bounded by the configured `(category, subcategory)`
//! pairs, so there is no size-based eviction; entries simply expire after
//! the TTL and are overwritten by the next fetch.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::metrics;
use crate::store::VideoRecord;

struct CacheEntry {
    videos: Vec<VideoRecord>,
    created_at: Instant,
}

/// Cache occupancy snapshot for health/debug endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub ttl_secs: u64,
    pub keys: Vec<CacheEntryInfo>,
}

/// Age of one cache entry, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryInfo {
    pub key: String,
    pub age_secs: u64,
}

/// TTL-bounded cache keyed by compound `category_subcategory` strings.
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Compound cache key for a video list.
    pub fn video_key(category: &str, subcategory: &str) -> String {
        format!("{category}_{subcategory}")
    }

    /// Look up a live entry. Expired entries behave exactly like a miss and
    /// stay in place until the caller overwrites them with `put`.
    pub fn get(&self, key: &str) -> Option<Vec<VideoRecord>> {
        self.get_at(key, Instant::now())
    }

    fn lookup(&self, key: &str, now: Instant) -> (Option<Vec<VideoRecord>>, &'static str) {
        let entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.created_at) < self.ttl => {
                (Some(entry.videos.clone()), "hit")
            }
            Some(_) => (None, "expired"),
            None => (None, "miss"),
        }
    }

    /// `get` with an explicit clock, so TTL boundaries are testable.
    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Vec<VideoRecord>> {
        let (result, outcome) = self.lookup(key, now);
        metrics::CACHE_LOOKUPS.with_label_values(&[outcome]).inc();
        result
    }

    /// Store a fresh entry, replacing any previous one under the key.
    pub fn put(&self, key: &str, videos: Vec<VideoRecord>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                videos,
                created_at: Instant::now(),
            },
        );
    }

    /// Drop every entry. Used by the administrative clear endpoint.
    pub fn invalidate_all(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.len();
        entries.clear();
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap();
        let now = Instant::now();
        let mut keys: Vec<CacheEntryInfo> = entries
            .iter()
            .map(|(key, entry)| CacheEntryInfo {
                key: key.clone(),
                age_secs: now.duration_since(entry.created_at).as_secs(),
            })
            .collect();
        keys.sort_by(|a, b| a.key.cmp(&b.key));

        CacheStats {
            entries: entries.len(),
            ttl_secs: self.ttl.as_secs(),
            keys,
        }
    }
}
