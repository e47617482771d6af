//! Temporal aggregation of normalized records into a daily trend.
//!
//! Days are UTC calendar days so bucket boundaries never depend on the
//! machine the analysis runs on.

use crate::parser::schema::{DailyAggregate, TransactionRecord};
use crate::utils::config::SECONDS_PER_DAY;
use chrono::NaiveDate;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lookback period applied before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    AllTime,
    Days(u32),
}

impl Window {
    /// Zero days means "all time"
    pub fn from_days(days: u32) -> Self {
        if days == 0 {
            Window::AllTime
        } else {
            Window::Days(days)
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Window::AllTime => 0,
            Window::Days(days) => *days,
        }
    }

    /// Earliest included timestamp, `None` for all time
    pub fn cutoff(&self, now: i64) -> Option<i64> {
        match self {
            Window::AllTime => None,
            Window::Days(days) => Some(now.saturating_sub(i64::from(*days) * SECONDS_PER_DAY)),
        }
    }

    /// Lower edge is inclusive. There is no upper edge.
    pub fn contains(&self, timestamp: i64, now: i64) -> bool {
        self.cutoff(now).map_or(true, |cutoff| timestamp >= cutoff)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::AllTime => f.write_str("all time"),
            Window::Days(days) => write!(f, "last {} days", days),
        }
    }
}

/// Records inside the window
pub fn filter_window(
    records: &[TransactionRecord],
    window: Window,
    now: i64,
) -> Vec<&TransactionRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.timestamp, now))
        .collect()
}

/// Filter to the window and bucket by UTC day
///
/// **Public** - main entry point for temporal aggregation
///
/// # Returns
/// One aggregate per day present in the input, ascending by date.
/// Empty input yields an empty trend.
pub fn aggregate(records: &[TransactionRecord], window: Window, now: i64) -> Vec<DailyAggregate> {
    let windowed = filter_window(records, window, now);
    debug!(
        "{} of {} records inside window ({})",
        windowed.len(),
        records.len(),
        window
    );
    build_trend(windowed)
}

#[derive(Default)]
struct DayBucket {
    price_sum: f64,
    cost_sum: f64,
    count: usize,
}

/// Bucket already-windowed records by UTC day
pub fn build_trend<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Vec<DailyAggregate> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for record in records {
        if !passes_invariants(record) {
            continue;
        }
        let Some(date) = record.utc_date() else {
            error!("Record {} has no calendar date, skipping", record.hash);
            continue;
        };

        let bucket = buckets.entry(date).or_default();
        bucket.price_sum += record.gas_price;
        bucket.cost_sum += record.cost_native();
        bucket.count += 1;
    }

    // BTreeMap iteration is already ascending by date
    buckets
        .into_iter()
        .map(|(date, bucket)| DailyAggregate {
            date,
            avg_gas_price: bucket.price_sum / bucket.count as f64,
            total_cost_native: bucket.cost_sum,
            tx_count: bucket.count,
        })
        .collect()
}

/// Guard for records entering aggregation.
///
/// Panics in debug builds; release builds log and drop the record.
pub(crate) fn passes_invariants(record: &TransactionRecord) -> bool {
    match record.check_invariants() {
        Ok(()) => true,
        Err(violation) => {
            if cfg!(debug_assertions) {
                panic!("invariant violation after normalization: {}", violation);
            }
            error!("Invariant violation, dropping record: {}", violation);
            false
        }
    }
}
