//! Identity types for Vacancy entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_id_is_v7() {
        let id = new_entity_id();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_new_entity_ids_are_unique() {
        let a = new_entity_id();
        let b = new_entity_id();
        assert_ne!(a, b);
    }
}
