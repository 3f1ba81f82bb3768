//! In-memory inventory store
//!
//! The reference [`InventoryStore`] implementation, used by tests and by
//! embedded deployments. The whole inventory lives behind one `RwLock` so a
//! transaction can snapshot the full state, apply its upserts to the copy,
//! and swap it back in on commit - concurrent readers see the old state
//! until the swap and the new state after it, never a mix.
//!
//! Concurrent transactions are last-writer-wins; the nightly feed runs one
//! ingestion at a time.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use vacancy_core::{
    new_entity_id, EntityId, NightlyAvailability, Property, Room, StorageError, VacancyResult,
};

use crate::{InventoryStore, InventoryTx};

/// Everything the store knows, snapshot-cloneable as one unit.
#[derive(Debug, Clone, Default)]
struct InventoryState {
    properties: HashMap<EntityId, Property>,
    rooms: HashMap<EntityId, Room>,
    /// Room insertion order; drives stable enumeration.
    room_order: Vec<EntityId>,
    availability: HashMap<EntityId, NightlyAvailability>,
}

impl InventoryState {
    fn property_by_external_id(&self, external_id: &str) -> Option<&Property> {
        self.properties
            .values()
            .find(|p| p.external_property_id == external_id)
    }

    fn room_by_natural_key(&self, property_id: EntityId, external_room_id: &str) -> Option<&Room> {
        self.rooms
            .values()
            .find(|r| r.property_id == property_id && r.external_room_id == external_room_id)
    }

    fn availability_by_natural_key(
        &self,
        room_id: EntityId,
        date: NaiveDate,
    ) -> Option<&NightlyAvailability> {
        self.availability
            .values()
            .find(|a| a.room_id == room_id && a.date == date)
    }
}

/// In-memory inventory store.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    state: Arc<RwLock<InventoryState>>,
}

impl MemoryInventory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of stored properties.
    pub fn property_count(&self) -> usize {
        self.state.read().map(|s| s.properties.len()).unwrap_or(0)
    }

    /// Count of stored rooms.
    pub fn room_count(&self) -> usize {
        self.state.read().map(|s| s.rooms.len()).unwrap_or(0)
    }

    /// Count of stored nightly availability records.
    pub fn availability_count(&self) -> usize {
        self.state.read().map(|s| s.availability.len()).unwrap_or(0)
    }

    fn read_state(&self) -> VacancyResult<InventoryState> {
        Ok(self
            .state
            .read()
            .map_err(|_| StorageError::LockPoisoned)?
            .clone())
    }
}

#[async_trait]
impl InventoryStore for MemoryInventory {
    async fn find_property_by_external_id(
        &self,
        external_id: &str,
    ) -> VacancyResult<Option<Property>> {
        let state = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(state.property_by_external_id(external_id).cloned())
    }

    async fn find_property_by_name(&self, name: &str) -> VacancyResult<Option<Property>> {
        let state = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        let wanted = name.to_lowercase();
        Ok(state
            .properties
            .values()
            .find(|p| p.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn list_rooms_for_property(&self, property_id: EntityId) -> VacancyResult<Vec<Room>> {
        let state = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(state
            .room_order
            .iter()
            .filter_map(|id| state.rooms.get(id))
            .filter(|r| r.property_id == property_id)
            .cloned()
            .collect())
    }

    async fn list_nightly_availability(
        &self,
        room_id: EntityId,
        dates: &[NaiveDate],
    ) -> VacancyResult<Vec<NightlyAvailability>> {
        let state = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut records: Vec<NightlyAvailability> = state
            .availability
            .values()
            .filter(|a| a.room_id == room_id && dates.contains(&a.date))
            .cloned()
            .collect();
        records.sort_by_key(|a| a.date);
        Ok(records)
    }

    async fn begin(&self) -> VacancyResult<Box<dyn InventoryTx + '_>> {
        let working = self.read_state()?;
        Ok(Box::new(MemoryTx {
            store: self,
            working,
        }))
    }
}

/// A pending batch of upserts against a snapshot of the store.
///
/// Dropping the transaction without `commit` discards the snapshot and with
/// it every upsert - rollback is the default.
struct MemoryTx<'a> {
    store: &'a MemoryInventory,
    working: InventoryState,
}

#[async_trait]
impl InventoryTx for MemoryTx<'_> {
    async fn upsert_property(&mut self, external_id: &str, name: &str) -> VacancyResult<Property> {
        let existing = self
            .working
            .property_by_external_id(external_id)
            .map(|p| p.property_id);
        if let Some(id) = existing {
            let property = self
                .working
                .properties
                .get_mut(&id)
                .ok_or(StorageError::NotFound {
                    entity: "Property",
                    id,
                })?;
            property.name = name.to_string();
            property.updated_at = Utc::now();
            return Ok(property.clone());
        }

        let now = Utc::now();
        let property = Property {
            property_id: new_entity_id(),
            external_property_id: external_id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.working
            .properties
            .insert(property.property_id, property.clone());
        Ok(property)
    }

    async fn upsert_room(
        &mut self,
        property_id: EntityId,
        external_room_id: &str,
        name: Option<&str>,
    ) -> VacancyResult<Room> {
        if !self.working.properties.contains_key(&property_id) {
            return Err(StorageError::NotFound {
                entity: "Property",
                id: property_id,
            }
            .into());
        }

        let existing = self
            .working
            .room_by_natural_key(property_id, external_room_id)
            .map(|r| r.room_id);
        if let Some(id) = existing {
            let room = self.working.rooms.get_mut(&id).ok_or(StorageError::NotFound {
                entity: "Room",
                id,
            })?;
            if let Some(name) = name {
                room.name = Some(name.to_string());
            }
            room.updated_at = Utc::now();
            return Ok(room.clone());
        }

        let now = Utc::now();
        let room = Room {
            room_id: new_entity_id(),
            property_id,
            external_room_id: external_room_id.to_string(),
            name: name.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        self.working.rooms.insert(room.room_id, room.clone());
        self.working.room_order.push(room.room_id);
        Ok(room)
    }

    async fn upsert_nightly_availability(
        &mut self,
        room_id: EntityId,
        date: NaiveDate,
        price: Decimal,
        max_guests: i32,
    ) -> VacancyResult<NightlyAvailability> {
        if max_guests < 1 {
            return Err(StorageError::ConstraintViolation {
                constraint: "max_guests_positive".to_string(),
                reason: format!("max_guests must be at least 1, got {}", max_guests),
            }
            .into());
        }
        if price.is_sign_negative() {
            return Err(StorageError::ConstraintViolation {
                constraint: "price_non_negative".to_string(),
                reason: format!("price must not be negative, got {}", price),
            }
            .into());
        }
        if !self.working.rooms.contains_key(&room_id) {
            return Err(StorageError::NotFound {
                entity: "Room",
                id: room_id,
            }
            .into());
        }

        let existing = self
            .working
            .availability_by_natural_key(room_id, date)
            .map(|a| a.availability_id);
        if let Some(id) = existing {
            let record =
                self.working
                    .availability
                    .get_mut(&id)
                    .ok_or(StorageError::NotFound {
                        entity: "NightlyAvailability",
                        id,
                    })?;
            record.price = price;
            record.max_guests = max_guests;
            record.updated_at = Utc::now();
            return Ok(record.clone());
        }

        let now = Utc::now();
        let record = NightlyAvailability {
            availability_id: new_entity_id(),
            room_id,
            date,
            price,
            max_guests,
            created_at: now,
            updated_at: now,
        };
        self.working
            .availability
            .insert(record.availability_id, record.clone());
        Ok(record)
    }

    async fn commit(self: Box<Self>) -> VacancyResult<()> {
        let mut state = self
            .store
            .state
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        *state = self.working;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
