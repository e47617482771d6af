//! Record normalizer.
//!
//! Validates raw feed entries and coerces them into `TransactionRecord`s.
//! A bad entry is dropped and counted; it never fails the batch.

use super::raw::RawTransaction;
use super::schema::TransactionRecord;
use crate::utils::config::{WEI_PER_GWEI, WEI_PER_NATIVE};
use crate::utils::error::RejectReason;
use chrono::DateTime;
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;

/// Output of one normalization pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    /// Successful, well-formed records eligible for aggregation
    pub valid: Vec<TransactionRecord>,

    /// Well-formed records that reverted. Excluded from aggregation
    /// but still visible to the risk classifier.
    pub failed: Vec<TransactionRecord>,

    /// Entries excluded from aggregation (malformed, duplicate or failed)
    pub rejected: usize,
}

impl NormalizedBatch {
    /// Every record the risk classifier should see
    pub fn assessable(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.valid.iter().chain(self.failed.iter())
    }
}

/// Normalize a batch of raw feed entries
///
/// **Public** - first stage of every analysis
///
/// Output order follows input order, but callers must not rely on it.
/// Duplicate hashes keep the first occurrence.
pub fn normalize(raw_records: &[RawTransaction]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(raw_records.len());

    for (index, raw) in raw_records.iter().enumerate() {
        let record = match normalize_record(raw) {
            Ok(record) => record,
            Err(reason) => {
                debug!("Rejected feed entry {}: {}", index, reason);
                batch.rejected += 1;
                continue;
            }
        };

        if !seen.insert(record.hash.clone()) {
            debug!(
                "Rejected feed entry {} ({}): {}",
                index,
                record.hash,
                RejectReason::Duplicate
            );
            batch.rejected += 1;
            continue;
        }

        if record.failed {
            debug!("Excluding failed transaction {} from aggregation", record.hash);
            batch.rejected += 1;
            batch.failed.push(record);
        } else {
            batch.valid.push(record);
        }
    }

    info!(
        "Normalized {} entries: {} valid, {} failed, {} rejected",
        raw_records.len(),
        batch.valid.len(),
        batch.failed.len(),
        batch.rejected
    );

    batch
}

/// Validate and convert one raw entry
///
/// Reverted transactions are converted (with `failed = true`) rather
/// than rejected, so the caller decides where they go.
pub fn normalize_record(raw: &RawTransaction) -> Result<TransactionRecord, RejectReason> {
    let hash = text_field(raw.hash.as_ref(), "hash")?
        .filter(|h| !h.is_empty())
        .ok_or(RejectReason::MissingField("hash"))?
        .to_string();

    let failed = parse_error_flag(raw.is_error.as_ref())?;

    let gas_price_wei = raw
        .gas_price
        .as_ref()
        .ok_or(RejectReason::MissingField("gasPrice"))
        .and_then(|v| parse_quantity(v).map_err(|detail| invalid("gasPrice", detail)))?;

    let gas_used = resolve_gas_used(raw)?;
    let timestamp = parse_timestamp(raw.time_stamp.as_ref())?;

    let value_wei = match &raw.value {
        Some(v) => parse_quantity(v).map_err(|detail| invalid("value", detail))?,
        None => 0,
    };

    let to = text_field(raw.to.as_ref(), "to")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let input_non_empty = text_field(raw.input.as_ref(), "input")?
        .is_some_and(|i| !i.is_empty() && i != "0x");

    let from = text_field(raw.from.as_ref(), "from")?
        .unwrap_or_default()
        .to_string();

    Ok(TransactionRecord {
        hash,
        from,
        to,
        value_native: value_wei as f64 / WEI_PER_NATIVE,
        gas_price: gas_price_wei as f64 / WEI_PER_GWEI,
        gas_used,
        timestamp,
        failed,
        input_non_empty,
    })
}

/// Parse a non-negative integer quantity from a JSON number or a
/// decimal / `0x` hex string
pub fn parse_quantity(value: &Value) -> Result<u128, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| format!("expected a non-negative integer, found {}", n)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("empty string".to_string());
            }
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u128::from_str_radix(hex, 16)
                    .map_err(|e| format!("invalid hex quantity {:?}: {}", s, e)),
                None => s
                    .parse::<u128>()
                    .map_err(|e| format!("invalid decimal quantity {:?}: {}", s, e)),
            }
        }
        other => Err(format!("expected number or string, found {}", other)),
    }
}

/// Trimmed text of an optional string field; null counts as absent
fn text_field<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<Option<&'a str>, RejectReason> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(other) => Err(invalid(field, format!("expected a string, found {}", other))),
    }
}

/// `gasUsed` when it is a positive integer, otherwise the gas limit
fn resolve_gas_used(raw: &RawTransaction) -> Result<u64, RejectReason> {
    let positive = |v: &Value| {
        parse_quantity(v)
            .ok()
            .filter(|q| *q > 0)
            .and_then(|q| u64::try_from(q).ok())
    };

    if let Some(used) = raw.gas_used.as_ref().and_then(positive) {
        return Ok(used);
    }
    if let Some(limit) = raw.gas.as_ref().and_then(positive) {
        return Ok(limit);
    }

    if raw.gas_used.is_none() && raw.gas.is_none() {
        Err(RejectReason::MissingField("gasUsed"))
    } else {
        Err(invalid("gasUsed", "neither gasUsed nor gas is a positive integer"))
    }
}

/// `false` for a success flag ("0", 0 or false), `true` for anything else
fn parse_error_flag(flag: Option<&Value>) -> Result<bool, RejectReason> {
    match flag {
        None | Some(Value::Null) => Err(RejectReason::MissingField("isError")),
        Some(Value::String(s)) => Ok(s.trim() != "0"),
        Some(Value::Number(n)) => Ok(n.as_u64() != Some(0)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(invalid("isError", format!("unexpected value {}", other))),
    }
}

fn parse_timestamp(value: Option<&Value>) -> Result<i64, RejectReason> {
    let value = value.ok_or(RejectReason::MissingField("timeStamp"))?;
    let seconds = parse_quantity(value).map_err(|detail| invalid("timeStamp", detail))?;

    let seconds = i64::try_from(seconds)
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| invalid("timeStamp", format!("{} is not a positive timestamp", seconds)))?;

    // Must map onto a calendar day
    if DateTime::from_timestamp(seconds, 0).is_none() {
        return Err(invalid("timeStamp", format!("{} is out of range", seconds)));
    }

    Ok(seconds)
}

fn invalid(field: &'static str, detail: impl Into<String>) -> RejectReason {
    RejectReason::InvalidField {
        field,
        detail: detail.into(),
    }
}
