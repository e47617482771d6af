//! Rule-based risk classification of individual transactions.
//!
//! Each rule adds a fixed weight to the score. A destination on the
//! scam registry forces the `High` tier whatever the score. Whether a
//! transaction is flagged suspicious depends on the configured
//! `RiskPolicy`; score and tier do not.

use super::registry::ScamRegistry;
use crate::parser::schema::{RiskAssessment, RiskFactor, RiskTier, TransactionRecord};
use crate::utils::config::{RiskConfig, RiskPolicy};
use log::debug;
use std::collections::BTreeMap;

const MAX_RISK_SCORE: u32 = 100;

/// Assess a single transaction
///
/// **Public** - pure function, no state carried between records
pub fn assess(
    record: &TransactionRecord,
    registry: &ScamRegistry,
    config: &RiskConfig,
) -> RiskAssessment {
    let mut score: u32 = 0;
    let mut factors = Vec::new();

    let mut add = |factor: RiskFactor, weight: u32| {
        score = score.saturating_add(weight);
        factors.push(factor);
    };

    if record.failed {
        add(RiskFactor::Failed, config.failed_weight);
    }
    if record.value_native > 0.0 && record.value_native < config.dust_threshold {
        add(RiskFactor::DustValue, config.dust_weight);
    }
    if record.is_contract_creation() {
        add(RiskFactor::ContractCreation, config.contract_creation_weight);
    }
    if record.gas_price > config.gas_price_ceiling {
        add(RiskFactor::HighGasPrice, config.high_gas_weight);
    }

    let scam_match = record
        .to
        .as_deref()
        .is_some_and(|to| registry.contains(to));
    if scam_match {
        factors.push(RiskFactor::KnownScamAddress);
    }

    let high_value = record.value_native > config.high_value_threshold;
    if high_value {
        factors.push(RiskFactor::HighValue);
    }

    let risk_score = score.min(MAX_RISK_SCORE) as u8;
    let tier = if scam_match {
        RiskTier::High
    } else {
        tier_for_score(risk_score, config)
    };

    let weighted_flag = tier != RiskTier::Low || scam_match;
    let value_flag = scam_match || high_value;
    let is_suspicious = match config.policy {
        RiskPolicy::Weighted => weighted_flag,
        RiskPolicy::ValueScreen => value_flag,
        RiskPolicy::Combined => weighted_flag || value_flag,
    };

    RiskAssessment {
        is_suspicious,
        risk_score,
        tier,
        factors,
    }
}

/// Map a numeric score onto a tier
pub fn tier_for_score(score: u8, config: &RiskConfig) -> RiskTier {
    let score = u32::from(score);
    if score >= config.high_tier_cutoff {
        RiskTier::High
    } else if score >= config.medium_tier_cutoff {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Assess every record, keyed by transaction hash
pub fn assess_all<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    registry: &ScamRegistry,
    config: &RiskConfig,
) -> BTreeMap<String, RiskAssessment> {
    let assessments: BTreeMap<String, RiskAssessment> = records
        .into_iter()
        .map(|record| (record.hash.clone(), assess(record, registry, config)))
        .collect();

    debug!(
        "Assessed {} transactions, {} suspicious",
        assessments.len(),
        count_suspicious(&assessments)
    );

    assessments
}

pub fn count_suspicious(assessments: &BTreeMap<String, RiskAssessment>) -> usize {
    assessments.values().filter(|a| a.is_suspicious).count()
}
