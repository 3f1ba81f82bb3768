//! Vacancy Storage - Inventory Store Trait and In-Memory Implementation
//!
//! Defines the storage abstraction layer for Vacancy entities. The engine
//! only ever talks to these traits; it does not own a schema and never sees
//! a concrete backend type.
//!
//! Writes happen inside an [`InventoryTx`] opened with
//! [`InventoryStore::begin`]: every upsert in the transaction lands on
//! commit, or none does. Dropping an uncommitted transaction rolls it back.

pub mod cache;
pub mod memory;

pub use cache::{
    cache_tags, fingerprint_key, CacheBackend, CacheStats, InMemoryCacheBackend,
    TaggedResultCache,
};
pub use memory::MemoryInventory;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use vacancy_core::{EntityId, NightlyAvailability, Property, Room, VacancyResult};

/// Read-side boundary of the inventory store.
///
/// Implementations must keep room enumeration order stable across calls so
/// that identical searches against unchanged inventory produce identically
/// ordered results.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Find a property by its caller-facing external id.
    async fn find_property_by_external_id(
        &self,
        external_id: &str,
    ) -> VacancyResult<Option<Property>>;

    /// Find a property by display name, case-insensitively.
    async fn find_property_by_name(&self, name: &str) -> VacancyResult<Option<Property>>;

    /// List all rooms of a property in stable (insertion) order.
    async fn list_rooms_for_property(&self, property_id: EntityId) -> VacancyResult<Vec<Room>>;

    /// List availability records for a room restricted to the given dates.
    ///
    /// Returns at most one record per requested date, ordered by date
    /// ascending.
    async fn list_nightly_availability(
        &self,
        room_id: EntityId,
        dates: &[NaiveDate],
    ) -> VacancyResult<Vec<NightlyAvailability>>;

    /// Open a write transaction.
    ///
    /// Readers observe either the state before `commit` or the state after
    /// it, never a mix.
    async fn begin(&self) -> VacancyResult<Box<dyn InventoryTx + '_>>;
}

/// Write-side boundary: a sequence of upserts that commits atomically.
///
/// All upserts are keyed by natural/business key, not internal id: a hit
/// updates the existing row in place, a miss creates it.
#[async_trait]
pub trait InventoryTx: Send {
    /// Upsert a property by external id, setting its display name.
    async fn upsert_property(&mut self, external_id: &str, name: &str) -> VacancyResult<Property>;

    /// Upsert a room scoped to a property by external room id.
    async fn upsert_room(
        &mut self,
        property_id: EntityId,
        external_room_id: &str,
        name: Option<&str>,
    ) -> VacancyResult<Room>;

    /// Upsert one night of inventory scoped to (room, date).
    ///
    /// Overwrite semantics: price and max_guests replace the stored values.
    /// Rejects `max_guests < 1` and negative prices with
    /// `StorageError::ConstraintViolation`.
    async fn upsert_nightly_availability(
        &mut self,
        room_id: EntityId,
        date: NaiveDate,
        price: Decimal,
        max_guests: i32,
    ) -> VacancyResult<NightlyAvailability>;

    /// Make every upsert in this transaction visible to readers.
    async fn commit(self: Box<Self>) -> VacancyResult<()>;
}
