//! Configuration and constants for the analytics engine.
//!
//! Unit scales and schema version are fixed. The scoring and risk
//! heuristics are plain defaults that can be overridden from a TOML file.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Unit conversions for EVM-style chains
// 1 native = 1e9 gwei = 1e18 wei
pub const WEI_PER_GWEI: f64 = 1e9;
pub const GWEI_PER_NATIVE: f64 = 1e9;
pub const WEI_PER_NATIVE: f64 = 1e18;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Lookback used by the CLI when no window is given
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Fiat rate used when the price source is unavailable
pub const DEFAULT_FIAT_RATE: f64 = 3000.0;

/// Baseline gas price (gwei) used when the oracle is unavailable
pub const DEFAULT_BASELINE_GAS_PRICE: f64 = 30.0;

/// Default timeout for feed requests
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(30);

// Public endpoints used by the live feed
pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/api";
pub const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";
pub const DEFAULT_SCAM_LIST_URL: &str = "https://cryptoscamdb.org/api/v1/addresses";

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Score normalization constants
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points removed from the performance base per unit of price/baseline ratio
    pub base_penalty: f64,

    /// Transactions below `low_price_ratio * baseline` earn the consistency bonus
    pub low_price_ratio: f64,

    /// Maximum bonus added to the performance score
    pub consistency_bonus: f64,

    /// Baseline gas price at which the health score reaches zero.
    /// A calibration knob, not a market model.
    pub health_calibration: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_penalty: 5.0,
            low_price_ratio: 0.8,
            consistency_bonus: 2.0,
            health_calibration: 100.0,
        }
    }
}

/// Which rule set decides `is_suspicious`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPolicy {
    /// Multi-factor score: suspicious when the tier is above Low or on a scam match
    Weighted,
    /// Scam list plus high-value screen only
    ValueScreen,
    /// Either of the above
    #[default]
    Combined,
}

/// Risk rule weights and thresholds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskConfig {
    pub failed_weight: u32,
    pub dust_weight: u32,
    pub contract_creation_weight: u32,
    pub high_gas_weight: u32,

    /// Values strictly between zero and this (native units) count as dust
    pub dust_threshold: f64,

    /// Gas price ceiling in gwei
    pub gas_price_ceiling: f64,

    /// Native value above which the value screen fires
    pub high_value_threshold: f64,

    pub medium_tier_cutoff: u32,
    pub high_tier_cutoff: u32,

    pub policy: RiskPolicy,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            failed_weight: 30,
            dust_weight: 20,
            contract_creation_weight: 25,
            high_gas_weight: 25,
            dust_threshold: 0.0001,
            gas_price_ceiling: 200.0,
            high_value_threshold: 10.0,
            medium_tier_cutoff: 30,
            high_tier_cutoff: 50,
            policy: RiskPolicy::Combined,
        }
    }
}

/// Reference values substituted when a source is unavailable
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub fiat_rate: f64,
    pub baseline_gas_price: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            fiat_rate: DEFAULT_FIAT_RATE,
            baseline_gas_price: DEFAULT_BASELINE_GAS_PRICE,
        }
    }
}

impl AnalyticsConfig {
    /// Reject values that would make the scores meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;
        if !(s.health_calibration.is_finite() && s.health_calibration > 0.0) {
            return Err(ConfigError::Invalid(
                "scoring.health_calibration must be positive".to_string(),
            ));
        }
        if !(s.low_price_ratio.is_finite() && s.low_price_ratio >= 0.0) {
            return Err(ConfigError::Invalid(
                "scoring.low_price_ratio must be non-negative".to_string(),
            ));
        }
        if !s.base_penalty.is_finite() || !s.consistency_bonus.is_finite() {
            return Err(ConfigError::Invalid(
                "scoring constants must be finite".to_string(),
            ));
        }

        let r = &self.risk;
        if r.medium_tier_cutoff > r.high_tier_cutoff {
            return Err(ConfigError::Invalid(format!(
                "risk.medium_tier_cutoff ({}) exceeds risk.high_tier_cutoff ({})",
                r.medium_tier_cutoff, r.high_tier_cutoff
            )));
        }
        for (name, value) in [
            ("risk.dust_threshold", r.dust_threshold),
            ("risk.gas_price_ceiling", r.gas_price_ceiling),
            ("risk.high_value_threshold", r.high_value_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }

        let f = &self.fallback;
        if !(f.fiat_rate.is_finite() && f.fiat_rate > 0.0) {
            return Err(ConfigError::Invalid(
                "fallback.fiat_rate must be positive".to_string(),
            ));
        }
        if !(f.baseline_gas_price.is_finite() && f.baseline_gas_price > 0.0) {
            return Err(ConfigError::Invalid(
                "fallback.baseline_gas_price must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load an engine configuration from a TOML file
///
/// Missing sections and fields keep their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If the file cannot be read
/// * `ConfigError::Parse` - If the TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyticsConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate an engine configuration from TOML text
pub fn parse_config(contents: &str) -> Result<AnalyticsConfig, ConfigError> {
    let config: AnalyticsConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
