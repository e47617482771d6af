//! Wallet Analytics CLI
//!
//! Gas spend analytics and transaction risk screening for EVM wallets.
//! Reads a transaction feed from a file or a block explorer and writes
//! a JSON report.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use wallet_analytics::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use wallet_analytics::utils::config::{DEFAULT_SCAM_LIST_URL, DEFAULT_WINDOW_DAYS};

/// Wallet Analytics - gas spend and risk reports for EVM wallets
#[derive(Parser, Debug)]
#[command(name = "wallet-analytics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a wallet's transaction history
    Analyze {
        /// Feed file (explorer txlist response or JSON array)
        #[arg(short, long, conflicts_with = "address")]
        input: Option<PathBuf>,

        /// Wallet address to fetch from the explorer
        #[arg(short, long)]
        address: Option<String>,

        /// Explorer API key
        #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Network baseline gas price in gwei (fetched from the gas oracle if omitted)
        #[arg(long)]
        baseline: Option<f64>,

        /// Native-to-USD rate (fetched from the price source if omitted)
        #[arg(long)]
        fiat_rate: Option<f64>,

        /// Lookback window in days, 0 for all time
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
        window: u32,

        /// Scam address list file
        #[arg(long)]
        scam_list: Option<PathBuf>,

        /// Scam address list URL (the public registry when given without a value)
        #[arg(
            long,
            conflicts_with = "scam_list",
            num_args = 0..=1,
            default_missing_value = DEFAULT_SCAM_LIST_URL
        )]
        scam_list_url: Option<String>,

        /// TOML file with scoring and risk settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Print a summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            address,
            api_key,
            baseline,
            fiat_rate,
            window,
            scam_list,
            scam_list_url,
            config,
            output,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                address,
                api_key,
                baseline_gas_price: baseline,
                fiat_rate,
                window_days: window,
                scam_list,
                scam_list_url,
                config,
                output,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
