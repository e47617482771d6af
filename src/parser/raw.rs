//! Transaction feed payload shape.
//!
//! Explorer APIs return every numeric field as a decimal string, but
//! nodes and exported files often use plain numbers or hex. Every field
//! is therefore kept as a raw JSON value here and validated by the
//! normalizer, so a badly typed entry is rejected and counted there
//! instead of vanishing during deserialization.

use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One transaction as delivered by the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,

    /// Empty or null for contract creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,

    /// Transferred value in wei
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Gas price in wei
    #[serde(default, rename = "gasPrice", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Value>,

    #[serde(default, rename = "gasUsed", skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<Value>,

    /// Gas limit, used when `gasUsed` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Value>,

    /// "0" on success
    #[serde(default, rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<Value>,

    /// Unix seconds
    #[serde(default, rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl RawTransaction {
    /// Hash as text, when the feed supplied a string
    pub fn hash_str(&self) -> Option<&str> {
        self.hash.as_ref().and_then(Value::as_str)
    }
}

/// Parse a feed payload from text
pub fn parse_feed_str(contents: &str) -> Result<Vec<RawTransaction>, ParseError> {
    let value: Value = serde_json::from_str(contents)?;
    parse_feed(&value)
}

/// Extract raw transactions from a feed payload
///
/// Accepts either a bare JSON array or an explorer envelope
/// (`{"status": .., "message": .., "result": [...]}`). Every array
/// element yields one entry; elements that are not objects become an
/// empty entry which the normalizer rejects.
///
/// # Errors
/// * `ParseError::InvalidFormat` - Payload is neither shape, or the envelope carries an error
pub fn parse_feed(payload: &Value) -> Result<Vec<RawTransaction>, ParseError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("result") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                return Err(ParseError::InvalidFormat(format!(
                    "feed returned {}: {}",
                    message, other
                )));
            }
            None => {
                return Err(ParseError::InvalidFormat(
                    "object payload has no result field".to_string(),
                ))
            }
        },
        _ => {
            return Err(ParseError::InvalidFormat(
                "feed must be a JSON array or an explorer envelope".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<RawTransaction>(item.clone()) {
            Ok(tx) => records.push(tx),
            Err(e) => {
                warn!("Feed entry {} is not a transaction object: {}", index, e);
                records.push(RawTransaction::default());
            }
        }
    }

    debug!("Parsed {} feed entries", records.len());
    Ok(records)
}
