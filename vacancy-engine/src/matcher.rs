//! Room availability matcher
//!
//! Decides, for one room, whether a stay can be satisfied and what it
//! costs. A room either yields a complete offer or nothing - never a
//! partial result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use vacancy_core::{Room, RoomOffer, VacancyResult};
use vacancy_storage::InventoryStore;

/// Evaluate one room against the required nights and guest count.
///
/// Rules, in order:
/// - all-nights: a record must exist for every night; any missing night
///   disqualifies the whole stay.
/// - capacity: a single night with `max_guests < guests` disqualifies the
///   room, regardless of the other nights.
///
/// The returned offer carries the exact sum of the per-night prices and the
/// minimum `max_guests` observed across the stay - the binding nightly
/// constraint, not an average.
pub async fn evaluate_room(
    store: &dyn InventoryStore,
    room: &Room,
    nights: &[NaiveDate],
    guests: i32,
) -> VacancyResult<Option<RoomOffer>> {
    let records = store
        .list_nightly_availability(room.room_id, nights)
        .await?;

    if records.len() != nights.len() {
        return Ok(None);
    }

    let mut total_price = Decimal::ZERO;
    let mut effective_max_guests = i32::MAX;

    for record in &records {
        if record.max_guests < guests {
            return Ok(None);
        }
        total_price += record.price;
        if record.max_guests < effective_max_guests {
            effective_max_guests = record.max_guests;
        }
    }

    Ok(Some(RoomOffer {
        room_id: room.external_room_id.clone(),
        max_guests: effective_max_guests,
        total_price,
    }))
}

// =============================================================================
// TESTS
// =============================================================================
