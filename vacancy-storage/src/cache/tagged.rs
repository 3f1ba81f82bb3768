//! Tagged result cache wrapper
//!
//! Get-or-compute over a [`CacheBackend`] with fingerprint keys, tag sets
//! and a fixed TTL, all driven by validated settings. The resolver stays
//! free of cache concerns; callers inject this wrapper where they want
//! caching and skip it where they do not.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};
use vacancy_core::{AvailabilityCacheSettings, CacheError, VacancyResult};

use super::key::{cache_tags, fingerprint_key};
use super::traits::CacheBackend;

/// Tag-addressable result cache with deterministic keys.
pub struct TaggedResultCache<B: CacheBackend> {
    backend: Arc<B>,
    settings: AvailabilityCacheSettings,
}

impl<B: CacheBackend> TaggedResultCache<B> {
    /// Create a new cache wrapper.
    ///
    /// Fails with `ConfigError` when the settings are malformed; a missing
    /// TTL or tag shape would otherwise produce unbounded or unevictable
    /// entries, so this is fatal rather than defaulted.
    pub fn new(backend: Arc<B>, settings: AvailabilityCacheSettings) -> VacancyResult<Self> {
        settings.validate()?;
        Ok(Self { backend, settings })
    }

    /// The validated settings in use.
    pub fn settings(&self) -> &AvailabilityCacheSettings {
        &self.settings
    }

    /// Get a reference to the cache backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Return the cached value for these parameters, or run `compute`,
    /// cache its result and return it.
    ///
    /// The key is a canonical fingerprint of `key_params`; the entry is
    /// tagged with the base tags plus `property_tag_prefix:identifier`.
    /// A hit returns the stored result unchanged and does not refresh the
    /// TTL.
    pub async fn remember<T, F, Fut>(
        &self,
        key_params: &BTreeMap<String, String>,
        property_identifier: &str,
        compute: F,
    ) -> VacancyResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = VacancyResult<T>> + Send,
    {
        let key = fingerprint_key(&self.settings.key_prefix, key_params);
        let tags = cache_tags(
            &self.settings.base_tags,
            &self.settings.property_tag_prefix,
            property_identifier,
        );
        debug!(key = %key, tags = ?tags, "attempting cache read");

        if let Some(bytes) = self.backend.get(&key).await? {
            let value = serde_json::from_slice(&bytes).map_err(|e| CacheError::Serialization {
                reason: e.to_string(),
            })?;
            return Ok(value);
        }

        info!(key = %key, "cache miss, computing fresh result");
        let value = compute().await?;
        let bytes = serde_json::to_vec(&value).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        self.backend
            .put(&key, bytes, &tags, self.settings.ttl())
            .await?;
        Ok(value)
    }

    /// Remove every cached entry for one property identifier.
    pub async fn invalidate_property(&self, identifier: &str) -> VacancyResult<u64> {
        let tag = format!("{}:{}", self.settings.property_tag_prefix, identifier);
        self.backend.invalidate_tag(&tag).await
    }

    /// Remove every entry under the base tags - the conservative fallback
    /// for backends that cannot address property-scoped tags atomically.
    pub async fn invalidate_all(&self) -> VacancyResult<u64> {
        let mut removed = 0;
        for tag in &self.settings.base_tags {
            removed += self.backend.invalidate_tag(tag).await?;
        }
        Ok(removed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
