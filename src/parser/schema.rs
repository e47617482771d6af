//! Canonical data model shared by every engine stage.
//!
//! Everything here is a plain immutable value: built fresh by one
//! `analyze` call and handed to the caller.

use crate::utils::config::GWEI_PER_NATIVE;
use crate::utils::error::InvariantViolation;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A validated transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash
    pub hash: String,

    /// Sender address
    pub from: String,

    /// Destination address, `None` for contract creation
    pub to: Option<String>,

    /// Transferred value in native units
    pub value_native: f64,

    /// Gas price in gwei
    pub gas_price: f64,

    /// Gas consumed (falls back to the gas limit when the feed omits it)
    pub gas_used: u64,

    /// Unix seconds, UTC
    pub timestamp: i64,

    /// True if the transaction reverted
    pub failed: bool,

    /// True if the call carried contract-invocation data
    pub input_non_empty: bool,
}

impl TransactionRecord {
    /// Fee paid in native units
    pub fn cost_native(&self) -> f64 {
        self.gas_used as f64 * self.gas_price / GWEI_PER_NATIVE
    }

    /// Fee this transaction would have paid at `gas_price` gwei
    pub fn cost_at(&self, gas_price: f64) -> f64 {
        self.gas_used as f64 * gas_price / GWEI_PER_NATIVE
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// UTC calendar day of the timestamp
    pub fn utc_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.timestamp, 0).map(|dt| dt.date_naive())
    }

    /// Check the shape required by aggregation
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.gas_used == 0 {
            return Err(InvariantViolation::NonPositiveGasUsed {
                hash: self.hash.clone(),
            });
        }
        if !(self.gas_price.is_finite() && self.gas_price >= 0.0) {
            return Err(InvariantViolation::InvalidGasPrice {
                hash: self.hash.clone(),
                value: self.gas_price,
            });
        }
        if self.timestamp <= 0 {
            return Err(InvariantViolation::NonPositiveTimestamp {
                hash: self.hash.clone(),
                value: self.timestamp,
            });
        }
        if self.failed {
            return Err(InvariantViolation::FailedRecord {
                hash: self.hash.clone(),
            });
        }
        Ok(())
    }
}

/// Per-day aggregate of the windowed records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// UTC calendar day
    pub date: NaiveDate,

    /// Unweighted mean gas price (gwei) of the day's transactions
    pub avg_gas_price: f64,

    /// Total fees paid that day in native units
    pub total_cost_native: f64,

    /// Number of transactions in the bucket
    pub tx_count: usize,
}

/// Consolidated output of one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Daily aggregates, ascending by date
    pub trend: Vec<DailyAggregate>,

    pub total_spend_native: f64,
    pub total_spend_fiat: f64,

    /// Fees saved against the baseline (negative when paying above it)
    pub total_savings_native: f64,
    pub total_savings_fiat: f64,

    /// Mean of the daily average prices (gwei)
    pub average_user_gas_price: f64,

    /// Baseline gas price (gwei) the scores were computed against
    pub network_baseline_gas_price: f64,

    /// Signed percentage vs the baseline, `None` when not available
    pub comparison_percent: Option<f64>,

    /// 0-10, higher is cheaper
    pub performance_score: f64,

    /// 0-100
    pub efficiency_score: f64,

    /// 0-10, lower means a congested network
    pub health_score: f64,

    /// Transactions priced strictly below the baseline
    pub optimized_count: usize,

    /// Transactions considered
    pub total_count: usize,
}

impl AnalyticsSnapshot {
    /// All-zero snapshot used for "no data"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    pub fn performance_rating(&self) -> PerformanceRating {
        PerformanceRating::from_score(self.performance_score)
    }
}

/// Qualitative band of the performance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            PerformanceRating::Excellent
        } else if score >= 6.0 {
            PerformanceRating::Good
        } else if score >= 4.0 {
            PerformanceRating::Fair
        } else {
            PerformanceRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::Good => "Good",
            PerformanceRating::Fair => "Fair",
            PerformanceRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Discrete risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        };
        f.write_str(name)
    }
}

/// A single rule that fired during risk assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Failed,
    DustValue,
    ContractCreation,
    HighGasPrice,
    KnownScamAddress,
    HighValue,
}

impl RiskFactor {
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::Failed => "Transaction failed",
            RiskFactor::DustValue => "Dust-sized transfer",
            RiskFactor::ContractCreation => "Contract creation",
            RiskFactor::HighGasPrice => "Gas price above ceiling",
            RiskFactor::KnownScamAddress => "Sent to known scam address",
            RiskFactor::HighValue => "High-value transaction",
        }
    }
}

/// Risk verdict for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub is_suspicious: bool,

    /// Additive rule score, 0-100
    pub risk_score: u8,

    pub tier: RiskTier,

    /// Rules that fired, in evaluation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<RiskFactor>,
}
