//! Vacancy Test Utilities
//!
//! Centralized test infrastructure for the Vacancy workspace:
//! - Fixture payloads and criteria for the canonical "Sunshine" scenario
//! - Pre-wired engine builders over the in-memory store and cache
//! - A failure-injecting store wrapper for rollback tests
//! - Proptest strategies for dates and guest counts

// Re-export the in-memory implementations from their source crate
pub use vacancy_storage::{InMemoryCacheBackend, MemoryInventory, TaggedResultCache};

// Re-export core types for convenience
pub use vacancy_core::{
    AvailabilityCacheSettings, AvailabilityResult, IngestionPayload, NightlyAvailability,
    Property, Room, RoomNight, RoomOffer, SearchCriteria, StorageError, VacancyError,
    VacancyResult,
};

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use vacancy_core::EntityId;
use vacancy_engine::{AvailabilityIngestion, AvailabilityService};
use vacancy_storage::{InventoryStore, InventoryTx};

// ============================================================================
// FIXTURES
// ============================================================================

/// Shorthand calendar date.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// The canonical two-night feed: property "Sunshine" (1001), room R101
/// available 2025-12-01 (100.00, 2 guests) and 2025-12-02 (105.00, 2 guests).
pub fn sunshine_payload() -> IngestionPayload {
    IngestionPayload {
        property_id: "1001".to_string(),
        name: "Sunshine".to_string(),
        rooms: vec![
            RoomNight {
                room_id: "R101".to_string(),
                date: date(2025, 12, 1),
                max_guests: 2,
                price: dec!(100.00),
            },
            RoomNight {
                room_id: "R101".to_string(),
                date: date(2025, 12, 2),
                max_guests: 2,
                price: dec!(105.00),
            },
        ],
    }
}

/// Criteria matching [`sunshine_payload`]: two nights, two guests.
pub fn sunshine_criteria() -> SearchCriteria {
    SearchCriteria {
        property_id: "1001".to_string(),
        check_in: date(2025, 12, 1),
        check_out: date(2025, 12, 3),
        guests: 2,
    }
}

/// A fully wired engine over fresh in-memory store and cache.
pub struct TestEngine {
    pub store: Arc<MemoryInventory>,
    pub cache: Arc<TaggedResultCache<InMemoryCacheBackend>>,
    pub search: AvailabilityService<InMemoryCacheBackend>,
    pub ingestion: AvailabilityIngestion<InMemoryCacheBackend>,
}

/// Build a [`TestEngine`] with default cache settings.
pub fn test_engine() -> TestEngine {
    test_engine_with_settings(AvailabilityCacheSettings::default())
}

/// Build a [`TestEngine`] with custom cache settings.
pub fn test_engine_with_settings(settings: AvailabilityCacheSettings) -> TestEngine {
    let store = Arc::new(MemoryInventory::new());
    let cache = Arc::new(
        TaggedResultCache::new(Arc::new(InMemoryCacheBackend::new()), settings)
            .expect("fixture settings are valid"),
    );
    let search = AvailabilityService::new(store.clone() as Arc<dyn InventoryStore>, cache.clone());
    let ingestion =
        AvailabilityIngestion::new(store.clone() as Arc<dyn InventoryStore>, cache.clone());
    TestEngine {
        store,
        cache,
        search,
        ingestion,
    }
}

// ============================================================================
// FAILURE-INJECTING STORE
// ============================================================================

/// Store wrapper whose transactions fail after a fixed number of writes.
///
/// Reads pass through untouched; the N-th+1 upsert in any transaction
/// returns `StorageError::TransactionFailed`. Used to prove that a failed
/// ingestion leaves no partial writes behind.
pub struct FailingStore {
    inner: Arc<MemoryInventory>,
    allowed_writes: usize,
}

impl FailingStore {
    /// Wrap a store, allowing `allowed_writes` upserts per transaction.
    pub fn new(inner: Arc<MemoryInventory>, allowed_writes: usize) -> Self {
        Self {
            inner,
            allowed_writes,
        }
    }
}

#[async_trait]
impl InventoryStore for FailingStore {
    async fn find_property_by_external_id(
        &self,
        external_id: &str,
    ) -> VacancyResult<Option<Property>> {
        self.inner.find_property_by_external_id(external_id).await
    }

    async fn find_property_by_name(&self, name: &str) -> VacancyResult<Option<Property>> {
        self.inner.find_property_by_name(name).await
    }

    async fn list_rooms_for_property(&self, property_id: EntityId) -> VacancyResult<Vec<Room>> {
        self.inner.list_rooms_for_property(property_id).await
    }

    async fn list_nightly_availability(
        &self,
        room_id: EntityId,
        dates: &[NaiveDate],
    ) -> VacancyResult<Vec<NightlyAvailability>> {
        self.inner.list_nightly_availability(room_id, dates).await
    }

    async fn begin(&self) -> VacancyResult<Box<dyn InventoryTx + '_>> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(FailingTx {
            inner,
            remaining: self.allowed_writes,
        }))
    }
}

struct FailingTx<'a> {
    inner: Box<dyn InventoryTx + 'a>,
    remaining: usize,
}

impl FailingTx<'_> {
    fn take_write(&mut self) -> VacancyResult<()> {
        if self.remaining == 0 {
            return Err(StorageError::TransactionFailed {
                reason: "injected write failure".to_string(),
            }
            .into());
        }
        self.remaining -= 1;
        Ok(())
    }
}

#[async_trait]
impl InventoryTx for FailingTx<'_> {
    async fn upsert_property(&mut self, external_id: &str, name: &str) -> VacancyResult<Property> {
        self.take_write()?;
        self.inner.upsert_property(external_id, name).await
    }

    async fn upsert_room(
        &mut self,
        property_id: EntityId,
        external_room_id: &str,
        name: Option<&str>,
    ) -> VacancyResult<Room> {
        self.take_write()?;
        self.inner
            .upsert_room(property_id, external_room_id, name)
            .await
    }

    async fn upsert_nightly_availability(
        &mut self,
        room_id: EntityId,
        date: NaiveDate,
        price: Decimal,
        max_guests: i32,
    ) -> VacancyResult<NightlyAvailability> {
        self.take_write()?;
        self.inner
            .upsert_nightly_availability(room_id, date, price, max_guests)
            .await
    }

    async fn commit(self: Box<Self>) -> VacancyResult<()> {
        self.inner.commit().await
    }
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Any calendar date in a two-decade window.
pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..7_300).prop_map(|offset| {
        date(2020, 1, 1)
            .checked_add_days(Days::new(offset))
            .expect("offset stays in range")
    })
}

/// A valid stay: check-out strictly after check-in, at most 30 nights.
pub fn arb_stay() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (arb_date(), 1u64..=30).prop_map(|(check_in, nights)| {
        let check_out = check_in
            .checked_add_days(Days::new(nights))
            .expect("stay stays in range");
        (check_in, check_out)
    })
}

/// A plausible guest count.
pub fn arb_guests() -> impl Strategy<Value = i32> {
    1i32..=8
}

/// A plausible nightly price with two decimal places.
pub fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
}
