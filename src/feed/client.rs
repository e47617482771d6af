//! Blocking HTTP client for the transaction feed and reference values.

use super::types::{ExplorerResponse, GasOracle, SimplePriceResponse};
use crate::parser::raw::{parse_feed, RawTransaction};
use crate::risk::ScamRegistry;
use crate::utils::config::{
    DEFAULT_EXPLORER_URL, DEFAULT_FEED_TIMEOUT, DEFAULT_PRICE_URL,
};
use crate::utils::error::FeedError;
use log::{debug, info, warn};
use reqwest::blocking::Client;

/// Client for the block explorer and the spot price endpoint
pub struct FeedClient {
    client: Client,
    explorer_url: String,
    price_url: String,
    api_key: String,
}

impl FeedClient {
    /// Create a client against the public endpoints
    pub fn new(api_key: impl Into<String>) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(DEFAULT_FEED_TIMEOUT)
            .build()
            .map_err(FeedError::RequestFailed)?;

        Ok(Self {
            client,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at different endpoints (self-hosted explorers, other chains)
    pub fn with_endpoints(
        mut self,
        explorer_url: impl Into<String>,
        price_url: impl Into<String>,
    ) -> Self {
        self.explorer_url = explorer_url.into();
        self.price_url = price_url.into();
        self
    }

    /// Fetch the full transaction history of an address
    ///
    /// An address without history yields an empty list.
    ///
    /// # Errors
    /// * `FeedError::RequestFailed` - network or HTTP failure
    /// * `FeedError::ApiError` - explorer rejected the request
    /// * `FeedError::InvalidPayload` - result is not a transaction list
    pub fn fetch_transactions(&self, address: &str) -> Result<Vec<RawTransaction>, FeedError> {
        info!("Fetching transaction history for {}", address);

        let response: ExplorerResponse = self
            .client
            .get(&self.explorer_url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let records = transactions_from_response(&response)?;
        debug!("Explorer returned {} transactions", records.len());
        Ok(records)
    }

    /// Fetch the proposed network gas price (gwei)
    pub fn fetch_baseline_gas_price(&self) -> Result<f64, FeedError> {
        debug!("Fetching gas oracle");

        let response: ExplorerResponse = self
            .client
            .get(&self.explorer_url)
            .query(&[
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        baseline_from_response(&response)
    }

    /// Fetch the native-to-USD spot rate
    pub fn fetch_fiat_rate(&self) -> Result<f64, FeedError> {
        debug!("Fetching fiat rate");

        let response: SimplePriceResponse = self
            .client
            .get(&self.price_url)
            .send()?
            .error_for_status()?
            .json()?;

        fiat_rate_from_response(&response)
    }

    /// Download a scam-address list
    pub fn fetch_scam_registry(&self, url: &str) -> Result<ScamRegistry, FeedError> {
        info!("Fetching scam address list from {}", url);

        let body = self.client.get(url).send()?.error_for_status()?.text()?;

        let registry =
            ScamRegistry::parse(&body).map_err(|e| FeedError::InvalidPayload(e.to_string()))?;
        if registry.is_empty() {
            warn!("Scam address list at {} is empty", url);
        }
        Ok(registry)
    }
}

/// Extract transactions from a `txlist` response
pub fn transactions_from_response(
    response: &ExplorerResponse,
) -> Result<Vec<RawTransaction>, FeedError> {
    if response.is_empty_history() {
        return Ok(Vec::new());
    }
    if !response.is_ok() {
        return Err(FeedError::ApiError(response.error_detail()));
    }
    if !response.result.is_array() {
        return Err(FeedError::InvalidPayload(
            "txlist result is not an array".to_string(),
        ));
    }

    parse_feed(&response.result).map_err(|e| FeedError::InvalidPayload(e.to_string()))
}

/// Extract the proposed gas price from a `gasoracle` response
pub fn baseline_from_response(response: &ExplorerResponse) -> Result<f64, FeedError> {
    if !response.is_ok() {
        return Err(FeedError::ApiError(response.error_detail()));
    }

    let oracle: GasOracle = serde_json::from_value(response.result.clone())?;
    let price: f64 = oracle.propose_gas_price.trim().parse().map_err(|_| {
        FeedError::InvalidPayload(format!(
            "ProposeGasPrice is not a number: {}",
            oracle.propose_gas_price
        ))
    })?;

    if !price.is_finite() || price <= 0.0 {
        return Err(FeedError::InvalidPayload(format!(
            "ProposeGasPrice must be positive, got {}",
            price
        )));
    }
    Ok(price)
}

/// Extract the ETH/USD rate from a simple price response
pub fn fiat_rate_from_response(response: &SimplePriceResponse) -> Result<f64, FeedError> {
    let rate = response
        .get("ethereum")
        .and_then(|prices| prices.get("usd"))
        .copied()
        .ok_or_else(|| FeedError::InvalidPayload("missing ethereum.usd price".to_string()))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(FeedError::InvalidPayload(format!(
            "fiat rate must be positive, got {}",
            rate
        )));
    }
    Ok(rate)
}
