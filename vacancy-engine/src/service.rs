//! Cached availability search service
//!
//! The engine's caller-facing search surface: a resolver wrapped in the
//! tagged result cache. The cache is an injected collaborator with its own
//! lifecycle (built once at process start), reached only through
//! [`TaggedResultCache`] - never through ambient state.

use std::collections::BTreeMap;
use std::sync::Arc;
use vacancy_core::{AvailabilityResult, SearchCriteria, VacancyResult};
use vacancy_storage::{CacheBackend, InventoryStore, TaggedResultCache};

use crate::resolver::AvailabilityResolver;

/// Cached facade over [`AvailabilityResolver`].
pub struct AvailabilityService<B: CacheBackend> {
    resolver: AvailabilityResolver,
    cache: Arc<TaggedResultCache<B>>,
}

impl<B: CacheBackend> AvailabilityService<B> {
    /// Create the service from a store and an already-validated cache.
    pub fn new(store: Arc<dyn InventoryStore>, cache: Arc<TaggedResultCache<B>>) -> Self {
        Self {
            resolver: AvailabilityResolver::new(store),
            cache,
        }
    }

    /// Find available rooms for the criteria, consulting the cache first.
    ///
    /// The cache key fingerprints all four criteria fields in canonical
    /// order; the entry is tagged with the caller-supplied property
    /// identifier so ingestion can invalidate it surgically.
    pub async fn find_available_rooms(
        &self,
        criteria: &SearchCriteria,
    ) -> VacancyResult<AvailabilityResult> {
        let key_params = criteria_key_params(criteria);
        self.cache
            .remember(&key_params, &criteria.property_id, || {
                self.resolver.resolve(criteria)
            })
            .await
    }

    /// The uncached resolver, for callers that need a fresh read.
    pub fn resolver(&self) -> &AvailabilityResolver {
        &self.resolver
    }

    /// The cache wrapper in use.
    pub fn cache(&self) -> &TaggedResultCache<B> {
        &self.cache
    }
}

/// Canonical key parameters for one search. `BTreeMap` keeps them sorted by
/// field name, so assembly order never leaks into the fingerprint.
fn criteria_key_params(criteria: &SearchCriteria) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("property_id".to_string(), criteria.property_id.clone());
    params.insert("check_in".to_string(), criteria.check_in.to_string());
    params.insert("check_out".to_string(), criteria.check_out.to_string());
    params.insert("guests".to_string(), criteria.guests.to_string());
    params
}
