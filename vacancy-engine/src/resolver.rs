//! Availability resolver
//!
//! Orchestrates one search: validate the criteria, find the property,
//! compute the stay nights, evaluate every room, assemble the result.
//! Linear pipeline, no loops back.

use std::sync::Arc;
use tracing::debug;
use vacancy_core::{AvailabilityResult, Property, SearchCriteria, SearchError, VacancyResult};
use vacancy_storage::InventoryStore;

use crate::calendar::stay_nights;
use crate::matcher::evaluate_room;

/// Resolves search criteria into a set of room offers.
///
/// Holds no cache; callers wanting cached resolutions wrap this in
/// [`crate::AvailabilityService`].
pub struct AvailabilityResolver {
    store: Arc<dyn InventoryStore>,
}

impl AvailabilityResolver {
    /// Create a resolver over an inventory store.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Resolve one search.
    ///
    /// Errors:
    /// - `SearchError::GuestsNotPositive` for a guest count below 1
    /// - `SearchError::PropertyNotFound` when neither the name nor the
    ///   external-id lookup matches
    /// - `SearchError::InvalidDateRange` when check-out is not after
    ///   check-in
    ///
    /// Offers are emitted in the store's room enumeration order; identical
    /// criteria against unchanged inventory produce an identical result.
    pub async fn resolve(&self, criteria: &SearchCriteria) -> VacancyResult<AvailabilityResult> {
        if criteria.guests < 1 {
            return Err(SearchError::GuestsNotPositive {
                guests: criteria.guests,
            }
            .into());
        }

        let property = self.lookup_property(&criteria.property_id).await?;

        let nights = stay_nights(criteria.check_in, criteria.check_out);
        if nights.is_empty() {
            return Err(SearchError::InvalidDateRange.into());
        }

        let rooms = self
            .store
            .list_rooms_for_property(property.property_id)
            .await?;

        let mut offers = Vec::new();
        for room in &rooms {
            match evaluate_room(self.store.as_ref(), room, &nights, criteria.guests).await? {
                Some(offer) => offers.push(offer),
                None => {
                    debug!(room_id = %room.external_room_id, "room is not available for the stay");
                }
            }
        }

        Ok(AvailabilityResult {
            property_id: property.external_property_id,
            rooms: offers,
        })
    }

    /// Dual lookup: display name (case-insensitive) first, then external
    /// id. First hit wins.
    async fn lookup_property(&self, identifier: &str) -> VacancyResult<Property> {
        if let Some(property) = self.store.find_property_by_name(identifier).await? {
            return Ok(property);
        }
        self.store
            .find_property_by_external_id(identifier)
            .await?
            .ok_or_else(|| {
                SearchError::PropertyNotFound {
                    identifier: identifier.to_string(),
                }
                .into()
            })
    }
}
