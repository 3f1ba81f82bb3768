//! Cache key fingerprinting and tag assembly

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Build a deterministic cache key from a prefix and request parameters.
///
/// Parameters are hashed in canonical (sorted-by-name) order, so the order
/// in which the caller assembled them never changes the key. The digest is
/// SHA-256, hex-encoded, appended to the prefix as `prefix_hexdigest`.
pub fn fingerprint_key(prefix: &str, params: &BTreeMap<String, String>) -> String {
    let mut hasher = Sha256::new();
    for (i, (name, value)) in params.iter().enumerate() {
        if i > 0 {
            hasher.update(b"&");
        }
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
    }
    format!("{}_{}", prefix, hex::encode(hasher.finalize()))
}

/// Assemble the tag set for a cached entry: the base tags plus a scoped
/// `prefix:identifier` tag, deduplicated with order preserved.
pub fn cache_tags(
    base_tags: &[String],
    specific_tag_prefix: &str,
    specific_identifier: &str,
) -> Vec<String> {
    let mut tags: Vec<String> = base_tags.to_vec();
    tags.push(format!("{}:{}", specific_tag_prefix, specific_identifier));
    let mut seen = std::collections::HashSet::new();
    tags.retain(|t| seen.insert(t.clone()));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fingerprint_is_order_independent() {
        let a = params(&[("check_in", "2025-12-01"), ("guests", "2")]);
        let mut b = BTreeMap::new();
        b.insert("guests".to_string(), "2".to_string());
        b.insert("check_in".to_string(), "2025-12-01".to_string());
        assert_eq!(fingerprint_key("availability", &a), fingerprint_key("availability", &b));
    }

    #[test]
    fn test_fingerprint_changes_with_any_parameter() {
        let base = params(&[("check_in", "2025-12-01"), ("guests", "2")]);
        let other = params(&[("check_in", "2025-12-01"), ("guests", "3")]);
        assert_ne!(
            fingerprint_key("availability", &base),
            fingerprint_key("availability", &other)
        );
    }

    #[test]
    fn test_fingerprint_key_shape() {
        let key = fingerprint_key("availability", &params(&[("guests", "2")]));
        assert!(key.starts_with("availability_"));
        // SHA-256 hex digest is 64 chars
        assert_eq!(key.len(), "availability_".len() + 64);
    }

    #[test]
    fn test_cache_tags_appends_and_dedupes() {
        let base = vec!["availability".to_string()];
        let tags = cache_tags(&base, "property", "1001");
        assert_eq!(tags, vec!["availability", "property:1001"]);

        // A colliding specific tag is not duplicated
        let base = vec!["availability".to_string(), "property:1001".to_string()];
        let tags = cache_tags(&base, "property", "1001");
        assert_eq!(tags, vec!["availability", "property:1001"]);
    }
}
