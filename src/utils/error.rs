//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Why the normalizer dropped a raw record.
///
/// Never returned from `analyze`; rejections are logged and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("transaction reverted")]
    Failed,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {detail}")]
    InvalidField { field: &'static str, detail: String },

    #[error("duplicate hash")]
    Duplicate,
}

/// A record reached aggregation in a state the normalizer should never emit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("record {hash}: gas_used must be positive")]
    NonPositiveGasUsed { hash: String },

    #[error("record {hash}: gas price {value} is not a finite non-negative number")]
    InvalidGasPrice { hash: String, value: f64 },

    #[error("record {hash}: timestamp {value} is not positive")]
    NonPositiveTimestamp { hash: String, value: i64 },

    #[error("record {hash}: failed transaction in aggregation set")]
    FailedRecord { hash: String },
}

/// Errors that can occur while reading a transaction feed payload
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid feed format: {0}")]
    InvalidFormat(String),
}

/// Errors loading or validating the engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur while talking to the external feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Feed returned an error: {0}")]
    ApiError(String),

    #[error("Invalid feed payload: {0}")]
    InvalidPayload(String),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
