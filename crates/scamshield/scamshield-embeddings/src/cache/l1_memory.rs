//! Process-local query vector cache backed by moka.
//!
//! Repeat submissions of the same text skip the encoder round trip. Vectors
//! are stored unpadded and shared as `Arc<[f32]>` so a hit costs one copy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

const IDLE_EXPIRY: Duration = Duration::from_secs(60 * 60);
const HARD_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

/// Hit/miss counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct L1MemoryCache {
    vectors: Cache<String, Arc<[f32]>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        Self::with_expiry(max_entries, IDLE_EXPIRY, HARD_EXPIRY)
    }

    /// Cache with explicit idle and absolute expiry.
    pub fn with_expiry(max_entries: u64, idle: Duration, live: Duration) -> Self {
        let vectors = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(idle)
            .time_to_live(live)
            .build();
        Self {
            vectors,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        match self.vectors.get(key) {
            Some(vector) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(vector.to_vec())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: String, vector: &[f32]) {
        self.vectors.insert(key, Arc::from(vector));
    }

    /// Entry count. moka updates this lazily, so it can lag recent writes.
    pub fn len(&self) -> u64 {
        self.vectors.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.vectors.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
