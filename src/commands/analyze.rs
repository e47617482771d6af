//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the transaction feed (file or live explorer fetch)
//! 2. Resolves the baseline gas price and fiat rate
//! 3. Loads the scam-address list
//! 4. Runs the analytics engine
//! 5. Writes the JSON report and optionally prints a summary

use crate::aggregator::Window;
use crate::engine::{AnalysisRequest, Analyzer};
use crate::feed::FeedClient;
use crate::output::{render_summary, write_report, AnalysisReport};
use crate::parser::raw::{parse_feed_str, RawTransaction};
use crate::risk::ScamRegistry;
use crate::utils::config::{load_config, AnalyticsConfig, DEFAULT_WINDOW_DAYS};
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Feed file (explorer response or bare array); takes precedence over `address`
    pub input: Option<PathBuf>,

    /// Wallet address for a live fetch
    pub address: Option<String>,

    /// Explorer API key, required for a live fetch
    pub api_key: Option<String>,

    /// Baseline gas price override (gwei)
    pub baseline_gas_price: Option<f64>,

    /// Fiat rate override
    pub fiat_rate: Option<f64>,

    /// Lookback in days, 0 for all time
    pub window_days: u32,

    /// Scam list file (JSON array, JSON object keys or one address per line)
    pub scam_list: Option<PathBuf>,

    /// Scam list URL, used when no file is given
    pub scam_list_url: Option<String>,

    /// TOML file overriding the scoring and risk heuristics
    pub config: Option<PathBuf>,

    /// Output path for the JSON report
    pub output: PathBuf,

    /// Print a terminal summary
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: None,
            address: None,
            api_key: None,
            baseline_gas_price: None,
            fiat_rate: None,
            window_days: DEFAULT_WINDOW_DAYS,
            scam_list: None,
            scam_list_url: None,
            config: None,
            output: PathBuf::from("report.json"),
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// Reference values that cannot be fetched are left unset so the
/// engine applies its fallbacks. A feed or scam list that cannot be
/// loaded is an error.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    // The price source and scam lists work without a key; explorer calls
    // made with an empty key fail and fall back like any other outage
    let client = if needs_client(&args) {
        let key = args.api_key.clone().unwrap_or_default();
        Some(FeedClient::new(key).context("Failed to create feed client")?)
    } else {
        None
    };

    info!("Step 1/4: Loading transactions...");
    let records = load_records(&args, client.as_ref())?;
    info!("Loaded {} feed entries", records.len());

    info!("Step 2/4: Resolving reference values...");
    let baseline = args
        .baseline_gas_price
        .or_else(|| client.as_ref().and_then(fetch_baseline));
    let fiat_rate = args
        .fiat_rate
        .or_else(|| client.as_ref().and_then(fetch_fiat_rate));
    debug!("Baseline: {:?} gwei, fiat rate: {:?}", baseline, fiat_rate);

    info!("Step 3/4: Loading scam address list...");
    let registry = load_registry(&args, client.as_ref())?;
    debug!("Scam registry holds {} addresses", registry.len());

    info!("Step 4/4: Analyzing...");
    let window = Window::from_days(args.window_days);
    let request = AnalysisRequest::new(&records, &registry, Utc::now().timestamp())
        .with_baseline(baseline)
        .with_fiat_rate(fiat_rate)
        .with_window(window);
    let analyzer = Analyzer::new(config);
    debug!("Risk policy: {:?}", analyzer.config().risk.policy);
    let analysis = analyzer.analyze(&request);

    let report = AnalysisReport::new(analysis, args.address.clone(), window);
    write_report(&report, &args.output).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output.display());

    if args.print_summary {
        println!("{}", render_summary(&report));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// A client is needed for anything not supplied locally
fn needs_client(args: &AnalyzeArgs) -> bool {
    args.input.is_none()
        || args.baseline_gas_price.is_none()
        || args.fiat_rate.is_none()
        || (args.scam_list.is_none() && args.scam_list_url.is_some())
}

fn load_records(args: &AnalyzeArgs, client: Option<&FeedClient>) -> Result<Vec<RawTransaction>> {
    if let Some(path) = &args.input {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read feed file {}", path.display()))?;
        return parse_feed_str(&contents)
            .with_context(|| format!("Failed to parse feed file {}", path.display()));
    }

    // validate_args guarantees an address and key when there is no input file
    let address = args
        .address
        .as_deref()
        .context("No input file or address given")?;
    let client = client.context("No feed client available")?;

    client
        .fetch_transactions(address)
        .with_context(|| format!("Failed to fetch transactions for {}", address))
}

fn load_registry(args: &AnalyzeArgs, client: Option<&FeedClient>) -> Result<ScamRegistry> {
    if let Some(path) = &args.scam_list {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scam list {}", path.display()))?;
        return ScamRegistry::parse(&contents)
            .with_context(|| format!("Failed to parse scam list {}", path.display()));
    }

    match (&args.scam_list_url, client) {
        (Some(url), Some(client)) => client
            .fetch_scam_registry(url)
            .with_context(|| format!("Failed to fetch scam list from {}", url)),
        _ => Ok(ScamRegistry::new()),
    }
}

fn fetch_baseline(client: &FeedClient) -> Option<f64> {
    client
        .fetch_baseline_gas_price()
        .map_err(|e| warn!("Gas oracle unavailable: {}", e))
        .ok()
}

fn fetch_fiat_rate(client: &FeedClient) -> Option<f64> {
    client
        .fetch_fiat_rate()
        .map_err(|e| warn!("Price source unavailable: {}", e))
        .ok()
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.is_none() {
        let address = match &args.address {
            Some(a) => a,
            None => anyhow::bail!("Either an input file or an address is required"),
        };
        validate_address(address)?;

        if args.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            anyhow::bail!("An API key is required to fetch transactions for an address");
        }
    }

    if let Some(baseline) = args.baseline_gas_price {
        if !baseline.is_finite() || baseline <= 0.0 {
            anyhow::bail!("Baseline gas price must be positive");
        }
    }

    if let Some(rate) = args.fiat_rate {
        if !rate.is_finite() || rate <= 0.0 {
            anyhow::bail!("Fiat rate must be positive");
        }
    }

    if let Some(url) = &args.scam_list_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Scam list URL must start with http:// or https://");
        }
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}

/// Basic address shape check: 20 bytes of hex with 0x prefix
fn validate_address(address: &str) -> Result<()> {
    let hex = match address.strip_prefix("0x") {
        Some(h) => h,
        None => anyhow::bail!("Address must start with 0x"),
    };

    if hex.len() != 40 {
        anyhow::bail!("Address must be 20 bytes (40 hex characters)");
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Address contains invalid characters");
    }

    Ok(())
}
