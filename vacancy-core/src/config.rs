//! Configuration types

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache settings for availability search results.
///
/// Injected at construction time by whoever wires the engine; a malformed
/// value is a deployment defect and fails `validate()` rather than being
/// silently defaulted - an unbounded TTL or an untagged (unevictable) entry
/// is worse than a startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCacheSettings {
    /// Prefix for every cache key, e.g. `availability`.
    pub key_prefix: String,
    /// Tags attached to every cached search result.
    pub base_tags: Vec<String>,
    /// Prefix for the property-scoped tag, e.g. `property` -> `property:1001`.
    pub property_tag_prefix: String,
    /// Fixed expiry for cached entries, in seconds.
    pub ttl_seconds: i64,
}

impl Default for AvailabilityCacheSettings {
    fn default() -> Self {
        Self {
            key_prefix: "availability".to_string(),
            base_tags: vec!["availability".to_string()],
            property_tag_prefix: "property".to_string(),
            ttl_seconds: 60 * 60 * 24,
        }
    }
}

impl AvailabilityCacheSettings {
    /// Check every field for shape errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "key_prefix".to_string(),
            });
        }
        if self.base_tags.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "base_tags".to_string(),
            });
        }
        if let Some(empty) = self.base_tags.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "base_tags".to_string(),
                value: empty.clone(),
                reason: "tags must be non-empty".to_string(),
            });
        }
        if self.property_tag_prefix.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "property_tag_prefix".to_string(),
            });
        }
        if self.ttl_seconds < 1 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_seconds".to_string(),
                value: self.ttl_seconds.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// The entry TTL as a std `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds.max(0) as u64)
    }
}
