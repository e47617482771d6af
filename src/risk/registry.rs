//! Known scam address registry.
//!
//! Addresses are compared case-insensitively, so everything is stored
//! lowercased.

use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScamRegistry {
    addresses: HashSet<String>,
}

impl ScamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address; returns false if it was already present or blank
    pub fn insert(&mut self, address: &str) -> bool {
        let address = canonical(address);
        if address.is_empty() {
            return false;
        }
        self.addresses.insert(address)
    }

    pub fn contains(&self, address: &str) -> bool {
        !self.addresses.is_empty() && self.addresses.contains(&canonical(address))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Parse a registry export.
    ///
    /// Accepts a JSON array of addresses, a JSON object keyed by address
    /// (optionally wrapped in `{"result": {...}}`), or plain text with one
    /// address per line (`#` starts a comment).
    ///
    /// Content opening with `[` or `{` must be valid JSON; it is never
    /// read as plain lines.
    pub fn parse(contents: &str) -> Result<Self, ParseError> {
        let trimmed = contents.trim_start();
        let registry = if trimmed.starts_with('[') || trimmed.starts_with('{') {
            let value: Value = serde_json::from_str(trimmed)?;
            Self::from_json(&value)
        } else {
            contents
                .lines()
                .map(|line| line.split('#').next().unwrap_or_default())
                .collect()
        };
        debug!("Loaded {} scam addresses", registry.len());
        Ok(registry)
    }

    /// Addresses from a decoded registry payload
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            Value::Object(obj) => match obj.get("result") {
                Some(inner @ (Value::Object(_) | Value::Array(_))) => Self::from_json(inner),
                _ => obj.keys().map(String::as_str).collect(),
            },
            _ => Self::new(),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ScamRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for address in iter {
            registry.insert(address.as_ref());
        }
        registry
    }
}

fn canonical(address: &str) -> String {
    address.trim().to_lowercase()
}
