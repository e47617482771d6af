//! Report written to disk by the CLI.
//!
//! Wraps an `Analysis` with the metadata a reader needs to interpret it.

use crate::aggregator::Window;
use crate::engine::Analysis;
use crate::parser::schema::PerformanceRating;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Wallet address, when the feed was fetched live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub window: Window,

    pub performance_rating: PerformanceRating,

    #[serde(flatten)]
    pub analysis: Analysis,
}

impl AnalysisReport {
    pub fn new(analysis: Analysis, address: Option<String>, window: Window) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            address,
            window,
            performance_rating: analysis.snapshot.performance_rating(),
            analysis,
        }
    }
}
