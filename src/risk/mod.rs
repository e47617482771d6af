//! Per-transaction risk classification.
//!
//! Independent of aggregation: every well-formed record, including
//! reverted ones and ones outside the analysis window, is assessed.

pub mod classifier;
pub mod registry;

pub use classifier::{assess, assess_all, count_suspicious, tier_for_score};
pub use registry::ScamRegistry;
