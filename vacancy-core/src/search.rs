//! Query-scoped search and ingestion shapes
//!
//! These types exist only for the duration of one resolution or ingestion
//! call (or until cached). None of them are persisted and none are mutated
//! after construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated input for one availability search.
///
/// `property_id` carries whatever identifier the caller sent - a display
/// name or an external property id; the resolver tries both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub property_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
}

/// One qualifying room in a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    /// The room's external id.
    pub room_id: String,
    /// Minimum `max_guests` across the stay - the binding nightly constraint.
    pub max_guests: i32,
    /// Exact sum of per-night prices across the stay.
    pub total_price: Decimal,
}

/// The complete outcome of one availability resolution.
///
/// This is the unit stored by the tagged result cache; offers keep the
/// store's room enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// The matched property's external id (not the caller's raw identifier).
    pub property_id: String,
    pub rooms: Vec<RoomOffer>,
}

/// One nightly rate/inventory entry in a feed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNight {
    pub room_id: String,
    pub date: NaiveDate,
    pub max_guests: i32,
    pub price: Decimal,
}

/// One feed payload: a property and its nightly room inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionPayload {
    pub property_id: String,
    pub name: String,
    pub rooms: Vec<RoomNight>,
}
