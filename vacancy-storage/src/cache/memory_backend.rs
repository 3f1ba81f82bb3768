//! In-memory cache backend
//!
//! Reference [`CacheBackend`] with fixed-expiry entries and a tag index.
//! Expired entries are dropped lazily on the read path.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use vacancy_core::{CacheError, VacancyResult};

use super::traits::{CacheBackend, CacheStats};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    tags: Vec<String>,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory tagged cache store.
#[derive(Debug, Default)]
pub struct InMemoryCacheBackend {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl InMemoryCacheBackend {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get(&self, key: &str) -> VacancyResult<Option<Vec<u8>>> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {} // expired, fall through to remove
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return Ok(None);
                }
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        tags: &[String],
        ttl: Duration,
    ) -> VacancyResult<()> {
        let ttl = ChronoDuration::from_std(ttl).map_err(|e| CacheError::Backend {
            reason: format!("ttl out of range: {}", e),
        })?;
        let entry = CacheEntry {
            value,
            tags: tags.to_vec(),
            expires_at: Utc::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> VacancyResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        let removed = (before - entries.len()) as u64;
        self.invalidations.fetch_add(removed, Ordering::Relaxed);
        Ok(removed)
    }

    async fn stats(&self) -> VacancyResult<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.entries.read().await.len() as u64,
            invalidations: self.invalidations.load(Ordering::Relaxed),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
