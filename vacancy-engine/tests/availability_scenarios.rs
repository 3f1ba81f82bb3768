//! End-to-End Availability Scenarios
//!
//! Drives the full engine - ingestion, resolution, caching - over the
//! in-memory store and cache backend.

use rust_decimal_macros::dec;
use std::sync::Arc;
use vacancy_core::SearchError;
use vacancy_engine::AvailabilityIngestion;
use vacancy_storage::{CacheBackend, InventoryStore};
use vacancy_test_utils::{
    date, sunshine_criteria, sunshine_payload, test_engine, FailingStore, IngestionPayload,
    MemoryInventory, RoomNight, SearchCriteria, StorageError, VacancyError,
};

#[tokio::test]
async fn test_two_night_stay_yields_single_offer_with_summed_price() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let result = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();

    assert_eq!(result.property_id, "1001");
    assert_eq!(result.rooms.len(), 1);
    assert_eq!(result.rooms[0].room_id, "R101");
    assert_eq!(result.rooms[0].max_guests, 2);
    assert_eq!(result.rooms[0].total_price, dec!(205.00));
}

#[tokio::test]
async fn test_capacity_rule_excludes_room_for_too_many_guests() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let criteria = SearchCriteria {
        guests: 3,
        ..sunshine_criteria()
    };
    let result = engine.search.find_available_rooms(&criteria).await.unwrap();
    assert!(result.rooms.is_empty());
}

#[tokio::test]
async fn test_all_nights_rule_excludes_room_with_missing_night() {
    let engine = test_engine();
    let mut payload = sunshine_payload();
    payload.rooms.truncate(1); // only 2025-12-01 remains
    engine.ingestion.ingest(&payload).await.unwrap();

    let result = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();
    assert!(result.rooms.is_empty());
}

#[tokio::test]
async fn test_unknown_property_identifier_is_not_found() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let criteria = SearchCriteria {
        property_id: "no-such-property".to_string(),
        ..sunshine_criteria()
    };
    let err = engine
        .search
        .find_available_rooms(&criteria)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VacancyError::Search(SearchError::PropertyNotFound { .. })
    ));
}

#[tokio::test]
async fn test_check_out_equal_to_check_in_is_invalid_range() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let criteria = SearchCriteria {
        check_out: date(2025, 12, 1),
        ..sunshine_criteria()
    };
    let err = engine
        .search
        .find_available_rooms(&criteria)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VacancyError::Search(SearchError::InvalidDateRange)
    ));
}

#[tokio::test]
async fn test_search_by_display_name_is_case_insensitive() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let criteria = SearchCriteria {
        property_id: "sunshine".to_string(),
        ..sunshine_criteria()
    };
    let result = engine.search.find_available_rooms(&criteria).await.unwrap();
    // The result carries the matched property's external id
    assert_eq!(result.property_id, "1001");
    assert_eq!(result.rooms.len(), 1);
}

#[tokio::test]
async fn test_identical_searches_hit_the_cache_and_agree() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let first = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();
    let second = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();

    assert_eq!(first, second);
    let stats = engine.cache.backend().stats().await.unwrap();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[tokio::test]
async fn test_ingestion_invalidates_cached_searches_for_the_property() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    let before = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();
    assert_eq!(before.rooms[0].total_price, dec!(205.00));

    // New feed re-prices the first night
    let mut payload = sunshine_payload();
    payload.rooms[0].price = dec!(120.00);
    engine.ingestion.ingest(&payload).await.unwrap();

    let after = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();
    assert_eq!(after.rooms[0].total_price, dec!(225.00));
}

#[tokio::test]
async fn test_offers_follow_feed_room_order() {
    let engine = test_engine();
    let payload = IngestionPayload {
        property_id: "1001".to_string(),
        name: "Sunshine".to_string(),
        rooms: vec![
            RoomNight {
                room_id: "R202".to_string(),
                date: date(2025, 12, 1),
                max_guests: 2,
                price: dec!(150.00),
            },
            RoomNight {
                room_id: "R101".to_string(),
                date: date(2025, 12, 1),
                max_guests: 2,
                price: dec!(100.00),
            },
        ],
    };
    engine.ingestion.ingest(&payload).await.unwrap();

    let criteria = SearchCriteria {
        check_in: date(2025, 12, 1),
        check_out: date(2025, 12, 2),
        ..sunshine_criteria()
    };
    let result = engine.search.find_available_rooms(&criteria).await.unwrap();
    let order: Vec<&str> = result.rooms.iter().map(|r| r.room_id.as_str()).collect();
    assert_eq!(order, vec!["R202", "R101"]);
}

#[tokio::test]
async fn test_non_positive_guest_count_is_rejected() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    for guests in [0, -2] {
        let criteria = SearchCriteria {
            guests,
            ..sunshine_criteria()
        };
        let err = engine
            .search
            .find_available_rooms(&criteria)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VacancyError::Search(SearchError::GuestsNotPositive { .. })
        ));
    }
}

#[tokio::test]
async fn test_failed_ingestion_leaves_no_partial_writes() {
    let engine = test_engine();

    // Second room-night violates the max_guests constraint
    let mut payload = sunshine_payload();
    payload.rooms[1].max_guests = 0;

    let err = engine.ingestion.ingest(&payload).await.unwrap_err();
    assert!(matches!(
        err,
        VacancyError::Storage(StorageError::ConstraintViolation { .. })
    ));

    // Nothing from the batch survived, not even the property upsert
    assert_eq!(engine.store.property_count(), 0);
    assert_eq!(engine.store.room_count(), 0);
    assert_eq!(engine.store.availability_count(), 0);
}

#[tokio::test]
async fn test_store_failure_mid_batch_rolls_back_everything() {
    let inner = Arc::new(MemoryInventory::new());
    // Property + first room land, the first nightly upsert fails
    let store = Arc::new(FailingStore::new(inner.clone(), 2));
    let engine = test_engine();
    let ingestion = AvailabilityIngestion::new(
        store as Arc<dyn InventoryStore>,
        engine.cache.clone(),
    );

    let err = ingestion.ingest(&sunshine_payload()).await.unwrap_err();
    assert!(matches!(
        err,
        VacancyError::Storage(StorageError::TransactionFailed { .. })
    ));

    assert_eq!(inner.property_count(), 0);
    assert_eq!(inner.room_count(), 0);
    assert_eq!(inner.availability_count(), 0);
}

#[tokio::test]
async fn test_retrying_a_failed_ingestion_is_idempotent() {
    let engine = test_engine();
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    // Re-ingesting the same payload upserts in place
    engine.ingestion.ingest(&sunshine_payload()).await.unwrap();

    assert_eq!(engine.store.property_count(), 1);
    assert_eq!(engine.store.room_count(), 1);
    assert_eq!(engine.store.availability_count(), 2);

    let result = engine
        .search
        .find_available_rooms(&sunshine_criteria())
        .await
        .unwrap();
    assert_eq!(result.rooms[0].total_price, dec!(205.00));
}
