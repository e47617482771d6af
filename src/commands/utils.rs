use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        println!(
            "⚠ Report schema v{} differs from current v{}",
            report.version, SCHEMA_VERSION
        );
    }

    let snapshot = &report.analysis.snapshot;
    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    if let Some(address) = &report.address {
        println!("  Address: {}", address);
    }
    println!("  Window: {}", report.window);
    println!("  Days: {}", snapshot.trend.len());
    println!("  Transactions: {}", snapshot.total_count);
    println!("  Total Spend: {:.6}", snapshot.total_spend_native);
    println!(
        "  Performance: {:.1} ({})",
        snapshot.performance_score,
        report.performance_rating.label()
    );
    println!("  Suspicious: {}", report.analysis.suspicious_count);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Wallet Analytics Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string              - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string         - ISO 8601 timestamp");
        println!("  address: string?             - Wallet address (live fetch only)");
        println!("  window: object|string        - {{\"days\": n}} or \"all_time\"");
        println!("  performance_rating: string   - excellent | good | fair | needs_improvement");
        println!("  snapshot: object             - Gas analytics for the window");
        println!("    trend: array               - One entry per UTC day, ascending");
        println!("      date: string             - YYYY-MM-DD");
        println!("      avg_gas_price: number    - Mean gas price (gwei)");
        println!("      total_cost_native: number - Gas cost that day");
        println!("      tx_count: number         - Transactions that day");
        println!("    total_spend_native: number - Sum of daily costs");
        println!("    total_spend_fiat: number   - Spend at the fiat rate");
        println!("    total_savings_native: number - Saved vs paying the baseline");
        println!("    total_savings_fiat: number - Savings at the fiat rate");
        println!("    average_user_gas_price: number - Mean of daily averages (gwei)");
        println!("    network_baseline_gas_price: number - Baseline used (gwei)");
        println!("    comparison_percent: number? - Avg vs baseline, null when undefined");
        println!("    performance_score: number  - 0..10");
        println!("    efficiency_score: number   - 0..100");
        println!("    health_score: number       - 0..10");
        println!("    optimized_count: number    - Transactions below the baseline");
        println!("    total_count: number        - Transactions in the window");
        println!("  assessments: object          - Risk verdict per transaction hash");
        println!("    is_suspicious: bool");
        println!("    risk_score: number         - 0..100");
        println!("    tier: string               - low | medium | high");
        println!("    factors: array?            - Rules that fired");
        println!("  rejected_count: number       - Feed entries excluded from analytics");
        println!("  suspicious_count: number     - Transactions flagged suspicious");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Wallet Analytics v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Gas spend analytics and transaction risk screening for EVM wallets.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Window;
    use crate::engine::Analysis;
    use crate::output::{write_report, AnalysisReport};
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_report_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let report = AnalysisReport::new(Analysis::default(), None, Window::Days(30));
        write_report(&report, temp_file.path()).unwrap();

        assert!(validate_report_file(temp_file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_report_file_rejects_garbage() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{\"not\": \"a report\"}").unwrap();

        assert!(validate_report_file(temp_file.path().to_path_buf()).is_err());
    }
}
