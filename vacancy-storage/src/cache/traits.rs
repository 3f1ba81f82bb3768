//! Cache backend trait
//!
//! Abstracts over concrete cache stores (in-memory, Redis, ...).
//! Implementations must be thread-safe and support concurrent access.

use async_trait::async_trait;
use std::time::Duration;
use vacancy_core::VacancyResult;

/// Key/value store with per-entry TTL and tag-based bulk invalidation.
///
/// Values are opaque bytes; serialization happens above this boundary so
/// that a cache hit returns exactly the bytes that were stored.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a value by key.
    ///
    /// An expired entry is a miss. Reading never extends an entry's life -
    /// this is a fixed-expiry cache, not an LRU.
    async fn get(&self, key: &str) -> VacancyResult<Option<Vec<u8>>>;

    /// Store a value under `key` with the given tags and TTL.
    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        tags: &[String],
        ttl: Duration,
    ) -> VacancyResult<()>;

    /// Remove every entry carrying `tag`. Returns the number removed.
    async fn invalidate_tag(&self, tag: &str) -> VacancyResult<u64>;

    /// Get cache statistics.
    async fn stats(&self) -> VacancyResult<CacheStats>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of entries removed by tag invalidation.
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }
}
