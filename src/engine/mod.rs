//! Analytics facade.
//!
//! Runs the whole pipeline for one (records, baseline, fiat rate,
//! window) input:
//!
//! ```text
//! raw records -> normalize -> { window -> trend -> spend/savings/scores }
//!                          -> { risk assessment (unwindowed) }
//! ```
//!
//! The engine is pure and synchronous. It performs no I/O, reads no
//! clock (`now` is supplied by the caller) and holds no state between
//! calls, so identical requests produce identical results.
//!
//! # Example
//! ```ignore
//! let registry = ScamRegistry::new();
//! let request = AnalysisRequest::new(&records, &registry, now)
//!     .with_baseline(Some(30.0))
//!     .with_fiat_rate(Some(3000.0))
//!     .with_window(Window::Days(30));
//! let analysis = Analyzer::default().analyze(&request);
//! ```

use crate::aggregator::{
    build_trend, compute_savings, compute_spend, filter_window, resolve_reference, score, Window,
};
use crate::parser::normalizer::normalize;
use crate::parser::raw::RawTransaction;
use crate::parser::schema::{AnalyticsSnapshot, RiskAssessment};
use crate::risk::{assess_all, count_suspicious, ScamRegistry};
use crate::utils::config::AnalyticsConfig;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs for one analysis
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    /// Feed entries, unordered
    pub records: &'a [RawTransaction],

    /// Network baseline gas price (gwei); `None` when the oracle was unavailable
    pub baseline_gas_price: Option<f64>,

    /// Native-to-fiat rate; `None` when the price source was unavailable
    pub fiat_rate: Option<f64>,

    pub window: Window,

    /// Reference time for windowing, unix seconds
    pub now: i64,

    pub scam_registry: &'a ScamRegistry,
}

impl<'a> AnalysisRequest<'a> {
    /// All-time window, no reference values (fallbacks apply)
    pub fn new(records: &'a [RawTransaction], scam_registry: &'a ScamRegistry, now: i64) -> Self {
        Self {
            records,
            baseline_gas_price: None,
            fiat_rate: None,
            window: Window::AllTime,
            now,
            scam_registry,
        }
    }

    pub fn with_baseline(mut self, baseline_gas_price: Option<f64>) -> Self {
        self.baseline_gas_price = baseline_gas_price;
        self
    }

    pub fn with_fiat_rate(mut self, fiat_rate: Option<f64>) -> Self {
        self.fiat_rate = fiat_rate;
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }
}

/// Result of one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub snapshot: AnalyticsSnapshot,

    /// Risk verdicts for every well-formed record, keyed by hash
    pub assessments: BTreeMap<String, RiskAssessment>,

    /// Feed entries excluded from aggregation
    pub rejected_count: usize,

    pub suspicious_count: usize,
}

/// Runs analyses with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyticsConfig,
}

impl Analyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Run the full pipeline
    ///
    /// Never fails: "no data" produces an all-zero snapshot with an
    /// empty trend, and missing reference values are replaced by the
    /// configured fallbacks.
    pub fn analyze(&self, request: &AnalysisRequest<'_>) -> Analysis {
        let batch = normalize(request.records);

        let assessments = assess_all(batch.assessable(), request.scam_registry, &self.config.risk);
        let suspicious_count = count_suspicious(&assessments);

        let windowed = filter_window(&batch.valid, request.window, request.now);

        let snapshot = if windowed.is_empty() {
            info!("No transactions in window ({}), returning empty snapshot", request.window);
            AnalyticsSnapshot::empty()
        } else {
            let baseline = resolve_reference(
                request.baseline_gas_price,
                self.config.fallback.baseline_gas_price,
                "baseline gas price",
            );
            let fiat_rate = resolve_reference(
                request.fiat_rate,
                self.config.fallback.fiat_rate,
                "fiat rate",
            );

            let trend = build_trend(windowed.iter().copied());
            let spend = compute_spend(&trend, fiat_rate);
            let savings = compute_savings(windowed.iter().copied(), baseline, fiat_rate);
            let scores = score(&trend, &windowed, baseline, &self.config.scoring);

            AnalyticsSnapshot {
                trend,
                total_spend_native: spend.total_native,
                total_spend_fiat: spend.total_fiat,
                total_savings_native: savings.total_native,
                total_savings_fiat: savings.total_fiat,
                average_user_gas_price: scores.average_user_gas_price,
                network_baseline_gas_price: baseline,
                comparison_percent: scores.comparison_percent,
                performance_score: scores.performance_score,
                efficiency_score: scores.efficiency_score,
                health_score: scores.health_score,
                optimized_count: scores.optimized_count,
                total_count: scores.total_count,
            }
        };

        info!(
            "Analysis complete: {} days, {} transactions, {} rejected, {} suspicious",
            snapshot.trend.len(),
            snapshot.total_count,
            batch.rejected,
            suspicious_count
        );

        Analysis {
            snapshot,
            assessments,
            rejected_count: batch.rejected,
            suspicious_count,
        }
    }
}

/// Analyze with the default configuration
///
/// `window_days == 0` means all time.
pub fn analyze(
    records: &[RawTransaction],
    baseline_gas_price: Option<f64>,
    fiat_rate: Option<f64>,
    window_days: u32,
    now: i64,
    scam_registry: &ScamRegistry,
) -> Analysis {
    let request = AnalysisRequest::new(records, scam_registry, now)
        .with_baseline(baseline_gas_price)
        .with_fiat_rate(fiat_rate)
        .with_window(Window::from_days(window_days));

    Analyzer::default().analyze(&request)
}
