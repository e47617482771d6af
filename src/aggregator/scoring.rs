//! Composite scores comparing the user's gas pricing to the network baseline.
//!
//! All three scores are normalized heuristics:
//! - performance (0-10): cheaper than baseline is better, with a bonus
//!   for consistently low-priced transactions
//! - efficiency (0-100): percentage below the baseline
//! - health (0-10): decreases as the baseline itself rises

use super::economics::finite_or_zero;
use super::temporal::passes_invariants;
use crate::parser::schema::{DailyAggregate, TransactionRecord};
use crate::utils::config::ScoringConfig;
use log::debug;

/// Scores and comparison figures for one analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    pub average_user_gas_price: f64,
    pub comparison_percent: Option<f64>,
    pub performance_score: f64,
    pub efficiency_score: f64,
    pub health_score: f64,
    pub optimized_count: usize,
    pub total_count: usize,
}

/// Score a trend against the baseline
///
/// **Public** - main entry point for scoring
///
/// # Arguments
/// * `trend` - Daily aggregates of the windowed records
/// * `records` - The windowed records the trend was built from
/// * `baseline_gas_price` - Network baseline in gwei
/// * `config` - Score constants
///
/// An empty trend scores zero everywhere with no comparison. Records
/// that `build_trend` would drop are left out of the counts too.
pub fn score(
    trend: &[DailyAggregate],
    records: &[&TransactionRecord],
    baseline_gas_price: f64,
    config: &ScoringConfig,
) -> Scores {
    if trend.is_empty() {
        debug!("Empty trend, all scores zero");
        return Scores::default();
    }

    let records: Vec<&TransactionRecord> = records
        .iter()
        .copied()
        .filter(|r| passes_invariants(r))
        .collect();

    let average = average_user_gas_price(trend);
    let baseline_ok = usable_baseline(baseline_gas_price);

    let optimized_count = if baseline_ok {
        records
            .iter()
            .filter(|r| r.gas_price < baseline_gas_price)
            .count()
    } else {
        0
    };

    let scores = Scores {
        average_user_gas_price: finite_or_zero(average),
        comparison_percent: comparison_percent(average, baseline_gas_price),
        performance_score: performance_score(average, &records, baseline_gas_price, config),
        efficiency_score: efficiency_score(average, baseline_gas_price),
        health_score: if baseline_ok {
            health_score(baseline_gas_price, config.health_calibration)
        } else {
            0.0
        },
        optimized_count,
        total_count: records.len(),
    };

    debug!(
        "Scores: performance {:.2}, efficiency {:.2}, health {:.2}",
        scores.performance_score, scores.efficiency_score, scores.health_score
    );

    scores
}

/// Mean of the daily averages (each day weighs the same)
pub fn average_user_gas_price(trend: &[DailyAggregate]) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }
    trend.iter().map(|d| d.avg_gas_price).sum::<f64>() / trend.len() as f64
}

/// Signed percentage difference from the baseline
pub fn comparison_percent(average: f64, baseline: f64) -> Option<f64> {
    if !usable_baseline(baseline) {
        return None;
    }
    let percent = (average - baseline) / baseline * 100.0;
    percent.is_finite().then_some(percent)
}

/// `10 - ratio * base_penalty`, clamped, plus up to `consistency_bonus`
/// for the share of transactions below `low_price_ratio * baseline`,
/// clamped again
pub fn performance_score(
    average: f64,
    records: &[&TransactionRecord],
    baseline: f64,
    config: &ScoringConfig,
) -> f64 {
    if !usable_baseline(baseline) || records.is_empty() {
        return 0.0;
    }

    let base = clamp(10.0 - (average / baseline) * config.base_penalty, 0.0, 10.0);

    let low_threshold = baseline * config.low_price_ratio;
    let low_count = records.iter().filter(|r| r.gas_price < low_threshold).count();
    let low_fraction = low_count as f64 / records.len() as f64;

    clamp(base + low_fraction * config.consistency_bonus, 0.0, 10.0)
}

/// `(1 - average / baseline) * 100`, clamped to 0-100
pub fn efficiency_score(average: f64, baseline: f64) -> f64 {
    if !usable_baseline(baseline) {
        return 0.0;
    }
    clamp((1.0 - average / baseline) * 100.0, 0.0, 100.0)
}

/// `(1 - baseline / calibration) * 10`, clamped to 0-10
pub fn health_score(baseline: f64, calibration: f64) -> f64 {
    if !(calibration.is_finite() && calibration > 0.0) {
        return 0.0;
    }
    clamp((1.0 - baseline / calibration) * 10.0, 0.0, 10.0)
}

fn usable_baseline(baseline: f64) -> bool {
    baseline.is_finite() && baseline > 0.0
}

/// Clamp that maps NaN to the lower bound
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
