//! Aggregation of normalized records into trends, spend and scores.
//!
//! This module transforms normalized transactions into:
//! - A daily trend (windowed, UTC days)
//! - Spend and savings totals in native and fiat units
//! - Composite performance, efficiency and health scores

pub mod economics;
pub mod scoring;
pub mod temporal;

// Re-export main types and functions
pub use economics::{compute_savings, compute_spend, resolve_reference, Savings, Spend};
pub use scoring::{score, Scores};
pub use temporal::{aggregate, build_trend, filter_window, Window};
