//! Feed parsing, normalization and the canonical data model.
//!
//! This module handles:
//! - Deserializing raw transaction feed payloads
//! - Validating and converting entries into `TransactionRecord`s
//! - Defining the engine's output schema

pub mod normalizer;
pub mod raw;
pub mod schema;

// Re-export main types
pub use normalizer::{normalize, normalize_record, parse_quantity, NormalizedBatch};
pub use raw::{parse_feed, parse_feed_str, RawTransaction};
pub use schema::{
    AnalyticsSnapshot, DailyAggregate, PerformanceRating, RiskAssessment, RiskFactor, RiskTier,
    TransactionRecord,
};
