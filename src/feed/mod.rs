//! Live data sources: explorer transaction history, gas oracle,
//! fiat spot price and scam-address lists.
//!
//! The analytics engine never calls this module. The CLI fetches here
//! and hands the results to the engine as plain values.

pub mod client;
pub mod types;

pub use client::{
    baseline_from_response, fiat_rate_from_response, transactions_from_response, FeedClient,
};
pub use types::{ExplorerResponse, GasOracle, SimplePriceResponse};
