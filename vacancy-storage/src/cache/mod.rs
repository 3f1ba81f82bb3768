//! Tagged result cache
//!
//! Wraps availability resolution in a deterministic, tag-addressable cache:
//! keys are canonical fingerprints of the search criteria, entries carry a
//! base tag plus a property-scoped tag, and ingestion invalidates by tag -
//! never by key pattern-matching. Expiry is fixed at write time; a read
//! does not refresh the TTL.

pub mod key;
pub mod memory_backend;
pub mod tagged;
pub mod traits;

pub use key::{cache_tags, fingerprint_key};
pub use memory_backend::InMemoryCacheBackend;
pub use tagged::TaggedResultCache;
pub use traits::{CacheBackend, CacheStats};
