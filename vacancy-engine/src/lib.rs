//! Vacancy Engine - Availability Resolution
//!
//! Answers "which rooms of a property are available, for which price, for a
//! given stay window and guest count", and ingests the nightly rate feeds
//! that make the answer possible.
//!
//! The engine consumes validated inputs and the storage/cache traits from
//! `vacancy-storage`; it does not parse HTTP, own a schema, or format any
//! user-facing text.
//!
//! # Components
//!
//! - [`calendar`] - stay window to night-date set
//! - [`matcher`] - per-room all-nights/capacity evaluation and aggregation
//! - [`resolver::AvailabilityResolver`] - uncached search orchestration
//! - [`service::AvailabilityService`] - the resolver behind the tagged
//!   result cache
//! - [`ingestion::AvailabilityIngestion`] - atomic feed upserts plus
//!   cache-tag invalidation

pub mod calendar;
pub mod ingestion;
pub mod matcher;
pub mod resolver;
pub mod service;

pub use calendar::{night_count, stay_nights};
pub use ingestion::AvailabilityIngestion;
pub use matcher::evaluate_room;
pub use resolver::AvailabilityResolver;
pub use service::AvailabilityService;
