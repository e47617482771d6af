//! Wallet Analytics
//!
//! Gas spend analytics and transaction risk screening for EVM
//! wallets.
//!
//! The core is a pure engine: hand it raw feed records, optional
//! reference values (baseline gas price, fiat rate), a lookback window
//! and a scam-address registry, and it returns a daily gas trend,
//! spend and savings totals, efficiency scores and a risk verdict per
//! transaction.
//!
//! ```ignore
//! use wallet_analytics::engine::analyze;
//! use wallet_analytics::parser::parse_feed_str;
//! use wallet_analytics::risk::ScamRegistry;
//!
//! let records = parse_feed_str(&feed_json)?;
//! let analysis = analyze(&records, Some(30.0), Some(3000.0), 30, now, &ScamRegistry::new());
//! println!("{:.1}/10", analysis.snapshot.performance_score);
//! ```
//!
//! The `wallet-analytics` binary wraps the engine with a live explorer
//! feed and JSON report output.

pub mod aggregator;
pub mod commands;
pub mod engine;
pub mod feed;
pub mod output;
pub mod parser;
pub mod risk;
pub mod utils;
