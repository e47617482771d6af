//! Gas economics: spend and savings against the network baseline.

use super::temporal::passes_invariants;
use crate::parser::schema::{DailyAggregate, TransactionRecord};
use log::warn;

/// Total fees paid
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spend {
    pub total_native: f64,
    pub total_fiat: f64,
}

/// Fees saved by paying below the baseline. Negative when the user
/// paid above it; never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Savings {
    pub total_native: f64,
    pub total_fiat: f64,
}

/// Sum the trend's daily costs and convert to fiat
pub fn compute_spend(trend: &[DailyAggregate], fiat_rate: f64) -> Spend {
    let total_native: f64 = trend.iter().map(|day| day.total_cost_native).sum();

    Spend {
        total_native: finite_or_zero(total_native),
        total_fiat: finite_or_zero(total_native * fiat_rate),
    }
}

/// Per transaction: cost at the baseline price minus the actual cost,
/// holding gas used fixed
pub fn compute_savings<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    baseline_gas_price: f64,
    fiat_rate: f64,
) -> Savings {
    let total_native: f64 = records
        .into_iter()
        .filter(|r| passes_invariants(r))
        .map(|r| r.cost_at(baseline_gas_price) - r.cost_native())
        .sum();

    Savings {
        total_native: finite_or_zero(total_native),
        total_fiat: finite_or_zero(total_native * fiat_rate),
    }
}

/// Pick the supplied reference value, or the caller's fallback when it
/// is missing, non-finite or non-positive
pub fn resolve_reference(value: Option<f64>, fallback: f64, name: &str) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            warn!("{} {} is unusable, falling back to {}", name, v, fallback);
            fallback
        }
        None => {
            warn!("{} unavailable, falling back to {}", name, fallback);
            fallback
        }
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
