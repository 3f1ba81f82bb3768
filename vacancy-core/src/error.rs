//! Error types for Vacancy operations

use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Upsert failed for {entity}: {reason}")]
    UpsertFailed { entity: &'static str, reason: String },

    #[error("Constraint violation on {constraint}: {reason}")]
    ConstraintViolation { constraint: String, reason: String },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Search resolution errors - client input, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid date range: check-out must be after check-in")]
    InvalidDateRange,

    #[error("Property '{identifier}' not found")]
    PropertyNotFound { identifier: String },

    #[error("Number of guests must be at least 1, got {guests}")]
    GuestsNotPositive { guests: i32 },
}

/// Configuration errors - deployment defects, fatal and never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Cache backend errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend error: {reason}")]
    Backend { reason: String },

    #[error("Cached value serialization failed: {reason}")]
    Serialization { reason: String },
}

/// Master error type for all Vacancy errors.
#[derive(Debug, Clone, Error)]
pub enum VacancyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Anything unexpected that is neither bad input nor a known subsystem
    /// failure. Callers can tell "your input was wrong" from "we broke".
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

/// Result type alias for Vacancy operations.
pub type VacancyResult<T> = Result<T, VacancyError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound {
            entity: "Property",
            id: Uuid::nil(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Entity not found"));
        assert!(msg.contains("Property"));
        assert!(msg.contains("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_search_error_display_property_not_found() {
        let err = SearchError::PropertyNotFound {
            identifier: "Sunshine".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Sunshine"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_search_error_display_invalid_date_range() {
        let err = SearchError::InvalidDateRange;
        let msg = format!("{}", err);
        assert!(msg.contains("check-out must be after check-in"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "ttl_seconds".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("ttl_seconds"));
        assert!(msg.contains("0"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_vacancy_error_from_variants() {
        let storage = VacancyError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, VacancyError::Storage(_)));

        let search = VacancyError::from(SearchError::InvalidDateRange);
        assert!(matches!(search, VacancyError::Search(_)));

        let config = VacancyError::from(ConfigError::MissingRequired {
            field: "key_prefix".to_string(),
        });
        assert!(matches!(config, VacancyError::Config(_)));

        let cache = VacancyError::from(CacheError::Backend {
            reason: "closed".to_string(),
        });
        assert!(matches!(cache, VacancyError::Cache(_)));
    }
}
