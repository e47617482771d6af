//! Terminal rendering of an analysis report.

use super::report::AnalysisReport;
use crate::parser::schema::{RiskAssessment, RiskTier};
use colored::*;

/// Number of flagged transactions listed in the summary
const MAX_FLAGGED_LISTED: usize = 10;

/// Render a human-readable summary of a report for the terminal
pub fn render_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_spend(report));
    out.push_str(&render_scores(report));
    out.push_str(&render_trend(report));
    out.push_str(&render_risk(report));

    out
}

fn render_header(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Wallet Gas Analytics".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    if let Some(address) = &report.address {
        out.push_str(&format!("Address:  {}\n", address));
    }
    out.push_str(&format!("Window:   {}\n", report.window));
    out.push_str(&format!(
        "Analyzed: {} transactions ({} rejected)\n",
        report.analysis.snapshot.total_count, report.analysis.rejected_count
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_spend(report: &AnalysisReport) -> String {
    let s = &report.analysis.snapshot;
    let savings = format!("{:+.2}", s.total_savings_fiat);
    let savings = if s.total_savings_fiat < 0.0 {
        savings.red()
    } else {
        savings.green()
    };

    format!(
        "Total gas:   {:.6} native (${:.2})\nSavings:     {} vs baseline\n",
        s.total_spend_native, s.total_spend_fiat, savings
    )
}

fn render_scores(report: &AnalysisReport) -> String {
    let s = &report.analysis.snapshot;
    let comparison = match s.comparison_percent {
        Some(p) if p > 0.0 => format!("{:+.2}%", p).red().to_string(),
        Some(p) => format!("{:+.2}%", p).green().to_string(),
        None => "N/A".to_string(),
    };

    format!(
        "Avg price:   {:.2} gwei ({} vs network average {:.2} gwei)\n\
         Performance: {:.1}/10 ({})\n\
         Efficiency:  {:.1}%\n\
         Health:      {:.1}/10\n\
         Optimized:   {}/{} transactions below baseline\n",
        s.average_user_gas_price,
        comparison,
        s.network_baseline_gas_price,
        s.performance_score,
        report.performance_rating.label(),
        s.efficiency_score,
        s.health_score,
        s.optimized_count,
        s.total_count
    )
}

fn render_trend(report: &AnalysisReport) -> String {
    let trend = &report.analysis.snapshot.trend;
    if trend.is_empty() {
        return format!("\nNo transactions in {}\n", report.window);
    }

    let mut out = String::from("\nDaily trend:\n");
    for day in trend {
        out.push_str(&format!(
            "  {}  {:>8.2} gwei  {:>12.6} native  ({} tx)\n",
            day.date, day.avg_gas_price, day.total_cost_native, day.tx_count
        ));
    }
    out
}

fn render_risk(report: &AnalysisReport) -> String {
    let analysis = &report.analysis;
    let mut out = format!(
        "\n{} suspicious transaction(s) of {} assessed\n",
        analysis.suspicious_count,
        analysis.assessments.len()
    );

    let mut flagged: Vec<(&String, &RiskAssessment)> = analysis
        .assessments
        .iter()
        .filter(|(_, a)| a.is_suspicious)
        .collect();
    flagged.sort_by(|a, b| b.1.tier.cmp(&a.1.tier).then(b.1.risk_score.cmp(&a.1.risk_score)));

    for (hash, assessment) in flagged.iter().take(MAX_FLAGGED_LISTED) {
        let reasons: Vec<&str> = assessment.factors.iter().map(|f| f.description()).collect();
        out.push_str(&format!(
            "  {} {} (score {}): {}\n",
            tier_badge(assessment.tier),
            hash,
            assessment.risk_score,
            reasons.join(", ")
        ));
    }
    if flagged.len() > MAX_FLAGGED_LISTED {
        out.push_str(&format!(
            "  ... and {} more\n",
            flagged.len() - MAX_FLAGGED_LISTED
        ));
    }
    out
}

fn tier_badge(tier: RiskTier) -> ColoredString {
    let label = format!("[{}]", tier.to_string().to_uppercase());
    match tier {
        RiskTier::High => label.red().bold(),
        RiskTier::Medium => label.yellow(),
        RiskTier::Low => label.normal(),
    }
}
