//! Persistent entity structures
//!
//! All three entities are create-or-update only: ingestion upserts them by
//! natural key and there is no delete path.

use crate::{EntityId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable property (hotel, guesthouse, ...).
///
/// Identity is twofold: `property_id` is the internal storage id, while
/// `external_property_id` is the unique caller-facing key used by feeds and
/// search queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property_id: EntityId,
    /// Caller-facing key, unique across all properties.
    pub external_property_id: String,
    /// Display name, matched case-insensitively by the resolver.
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A room belonging to exactly one property.
///
/// `external_room_id` is unique within its property, not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: EntityId,
    /// Owning property.
    pub property_id: EntityId,
    /// Caller-facing key, unique within the property.
    pub external_room_id: String,
    pub name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One night of inventory for one room.
///
/// At most one record exists per (room, date); a later ingestion for the
/// same key overwrites `price` and `max_guests` in place. No history is
/// retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlyAvailability {
    pub availability_id: EntityId,
    /// Owning room.
    pub room_id: EntityId,
    pub date: NaiveDate,
    /// Non-negative nightly price. Decimal, never binary floating point.
    pub price: Decimal,
    /// Positive guest capacity for this night.
    pub max_guests: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
