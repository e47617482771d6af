//! Response schemas for the explorer and price endpoints.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Explorer message for an address with no history
pub const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

/// Envelope shared by every explorer endpoint
///
/// `status` is "1" on success. On failure `result` usually holds a
/// human-readable error string instead of data.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub result: Value,
}

impl ExplorerResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// Explorer reports "no data" as a failure status
    pub fn is_empty_history(&self) -> bool {
        !self.is_ok() && self.message.starts_with(NO_TRANSACTIONS_MESSAGE)
    }

    /// Best description of a failure
    pub fn error_detail(&self) -> String {
        match &self.result {
            Value::String(s) if !s.is_empty() => format!("{}: {}", self.message, s),
            _ => self.message.clone(),
        }
    }
}

/// `gastracker/gasoracle` result, all prices in gwei as decimal strings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasOracle {
    #[serde(default)]
    pub last_block: Option<String>,

    #[serde(default)]
    pub safe_gas_price: Option<String>,

    pub propose_gas_price: String,

    #[serde(default)]
    pub fast_gas_price: Option<String>,
}

/// Spot price payload: asset id -> currency -> price
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;
