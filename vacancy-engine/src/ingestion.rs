//! Availability feed ingestion
//!
//! Applies one feed payload as a single transaction - property, then rooms,
//! then nightly records, in input order - and invalidates the affected
//! property's cached searches after commit.

use std::sync::Arc;
use tracing::{debug, info, warn};
use vacancy_core::{IngestionPayload, Property, VacancyResult};
use vacancy_storage::{CacheBackend, InventoryStore, InventoryTx, TaggedResultCache};

/// Ingests feed payloads and keeps the result cache consistent.
pub struct AvailabilityIngestion<B: CacheBackend> {
    store: Arc<dyn InventoryStore>,
    cache: Arc<TaggedResultCache<B>>,
}

impl<B: CacheBackend> AvailabilityIngestion<B> {
    /// Create an ingestion service sharing the searchers' cache.
    pub fn new(store: Arc<dyn InventoryStore>, cache: Arc<TaggedResultCache<B>>) -> Self {
        Self { store, cache }
    }

    /// Ingest one payload atomically.
    ///
    /// Either every upsert lands or none does; a failure mid-sequence rolls
    /// the whole batch back, so retrying a failed ingestion is safe and
    /// idempotent. Cache invalidation for the property's tag happens only
    /// after a successful commit and is best-effort: a flush failure is
    /// logged and does not fail the ingestion, leaving at worst a stale
    /// window bounded by the TTL.
    pub async fn ingest(&self, payload: &IngestionPayload) -> VacancyResult<Property> {
        let mut tx = self.store.begin().await?;

        let property = tx
            .upsert_property(&payload.property_id, &payload.name)
            .await?;

        for entry in &payload.rooms {
            let room = tx
                .upsert_room(property.property_id, &entry.room_id, None)
                .await?;
            tx.upsert_nightly_availability(room.room_id, entry.date, entry.price, entry.max_guests)
                .await?;
        }

        tx.commit().await?;
        info!(
            property_id = %payload.property_id,
            entries = payload.rooms.len(),
            "availability feed ingested"
        );

        match self.cache.invalidate_property(&payload.property_id).await {
            Ok(removed) => {
                debug!(removed, property_id = %payload.property_id, "invalidated cached searches");
            }
            Err(e) => {
                warn!(
                    error = %e,
                    property_id = %payload.property_id,
                    "cache invalidation failed after ingestion; entries expire with the TTL"
                );
            }
        }

        Ok(property)
    }

    /// Flush every cached availability entry - the conservative fallback
    /// when property-scoped invalidation is unavailable.
    pub async fn invalidate_all(&self) -> VacancyResult<u64> {
        self.cache.invalidate_all().await
    }
}
