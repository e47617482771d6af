use pretty_assertions::assert_eq;
use serde_json::json;
use wallet_analytics::aggregator::Window;
use wallet_analytics::engine::{analyze, AnalysisRequest, Analyzer};
use wallet_analytics::parser::{
    parse_feed_str, AnalyticsSnapshot, RawTransaction, RiskFactor, RiskTier,
};
use wallet_analytics::risk::ScamRegistry;
use wallet_analytics::utils::config::{AnalyticsConfig, RiskPolicy};

/// 2023-11-14 22:13:20 UTC
const NOW: i64 = 1_700_000_000;
/// 2023-11-14 00:00:00 UTC
const MIDNIGHT: i64 = 1_699_920_000;
const DAY: i64 = 86_400;

const SCAM: &str = "0x000000000000000000000000000000000000dead";

fn tx(hash: &str, gwei: u64, timestamp: i64) -> RawTransaction {
    serde_json::from_value(json!({
        "hash": hash,
        "from": "0x1111111111111111111111111111111111111111",
        "to": "0x2222222222222222222222222222222222222222",
        "value": "1000000000000000",
        "gasPrice": (gwei * 1_000_000_000).to_string(),
        "gasUsed": "21000",
        "isError": "0",
        "timeStamp": timestamp.to_string(),
        "input": "0x"
    }))
    .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_empty_input_yields_empty_snapshot() {
    let registry = ScamRegistry::new();
    let analysis = analyze(&[], Some(30.0), Some(3000.0), 30, NOW, &registry);

    assert_eq!(analysis.snapshot, AnalyticsSnapshot::empty());
    assert!(analysis.snapshot.trend.is_empty());
    assert_eq!(analysis.snapshot.comparison_percent, None);
    assert!(analysis.assessments.is_empty());
    assert_eq!(analysis.rejected_count, 0);
}

#[test]
fn test_all_records_outside_window_is_empty() {
    let records = vec![tx("0xa", 20, NOW - 40 * DAY)];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 30, NOW, &registry);

    assert!(analysis.snapshot.is_empty());
    assert_eq!(analysis.snapshot.total_spend_native, 0.0);
    assert_eq!(analysis.snapshot.network_baseline_gas_price, 0.0);
    // Risk assessment is not windowed
    assert_eq!(analysis.assessments.len(), 1);
}

#[test]
fn test_window_lower_bound_inclusive() {
    let cutoff = NOW - 7 * DAY;
    let records = vec![tx("0xin", 20, cutoff), tx("0xout", 20, cutoff - 1)];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 7, NOW, &registry);

    assert_eq!(analysis.snapshot.total_count, 1);
    assert_eq!(analysis.snapshot.trend.len(), 1);
}

#[test]
fn test_all_time_window_keeps_everything() {
    let records = vec![tx("0xold", 20, 1_500_000_000), tx("0xnew", 20, NOW)];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 0, NOW, &registry);

    assert_eq!(analysis.snapshot.total_count, 2);
    assert_eq!(analysis.snapshot.trend.len(), 2);
}

#[test]
fn test_cheap_wallet_scores() {
    // Every transaction at half the baseline
    let records = vec![
        tx("0xa", 15, MIDNIGHT + 100),
        tx("0xb", 15, MIDNIGHT + 200),
        tx("0xc", 15, MIDNIGHT - DAY + 100),
    ];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 30, NOW, &registry);
    let s = &analysis.snapshot;

    assert!(approx(s.average_user_gas_price, 15.0));
    assert!(approx(s.comparison_percent.unwrap(), -50.0));
    assert!(approx(s.performance_score, 9.5));
    assert!(approx(s.efficiency_score, 50.0));
    assert!(approx(s.health_score, 7.0));
    assert_eq!(s.optimized_count, 3);
    assert_eq!(s.total_count, 3);
    assert_eq!(analysis.suspicious_count, 0);
}

#[test]
fn test_daily_trend_and_spend() {
    let records = vec![
        tx("0xa", 10, MIDNIGHT + 10),
        tx("0xb", 30, MIDNIGHT + 20),
        tx("0xc", 40, MIDNIGHT - DAY),
    ];
    let registry = ScamRegistry::new();

    let s = analyze(&records, Some(30.0), Some(2000.0), 30, NOW, &registry).snapshot;

    assert_eq!(s.trend.len(), 2);
    assert!(s.trend[0].date < s.trend[1].date);

    assert!(approx(s.trend[0].avg_gas_price, 40.0));
    assert_eq!(s.trend[0].tx_count, 1);
    assert!(approx(s.trend[1].avg_gas_price, 20.0));
    assert_eq!(s.trend[1].tx_count, 2);

    // 21000 gas at 10 + 30 + 40 gwei
    let expected = 21_000.0 * 80.0 / 1e9;
    assert!(approx(s.total_spend_native, expected));
    assert!(approx(s.total_spend_fiat, expected * 2000.0));

    // Mean of daily means, not of transactions
    assert!(approx(s.average_user_gas_price, 30.0));
}

#[test]
fn test_missing_reference_values_use_fallbacks() {
    let records = vec![tx("0xa", 15, NOW - 10)];
    let registry = ScamRegistry::new();

    let s = analyze(&records, None, None, 30, NOW, &registry).snapshot;

    assert_eq!(s.network_baseline_gas_price, 30.0);
    assert!(approx(s.total_spend_fiat, s.total_spend_native * 3000.0));
}

#[test]
fn test_non_positive_baseline_falls_back() {
    let records = vec![tx("0xa", 15, NOW - 10)];
    let registry = ScamRegistry::new();

    let s = analyze(&records, Some(0.0), Some(-5.0), 30, NOW, &registry).snapshot;

    assert_eq!(s.network_baseline_gas_price, 30.0);
    assert!(s.comparison_percent.is_some());
    assert!(s.total_spend_fiat > 0.0);
}

#[test]
fn test_expensive_wallet_scores_bounded() {
    let records = vec![tx("0xa", 5000, NOW - 10), tx("0xb", 9000, NOW - 20)];
    let registry = ScamRegistry::new();

    let s = analyze(&records, Some(1.0), Some(3000.0), 30, NOW, &registry).snapshot;

    for score in [s.performance_score, s.health_score] {
        assert!(!score.is_nan());
        assert!((0.0..=10.0).contains(&score));
    }
    assert!(!s.efficiency_score.is_nan());
    assert!((0.0..=100.0).contains(&s.efficiency_score));
    assert_eq!(s.performance_score, 0.0);
    assert_eq!(s.efficiency_score, 0.0);
    assert!(s.total_savings_native < 0.0);
    assert_eq!(s.optimized_count, 0);
}

#[test]
fn test_failed_records_assessed_not_aggregated() {
    let mut failed = tx("0xfail", 20, NOW - 10);
    failed.is_error = Some(json!("1"));
    let records = vec![tx("0xok", 20, NOW - 10), failed];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 30, NOW, &registry);

    assert_eq!(analysis.snapshot.total_count, 1);
    assert_eq!(analysis.rejected_count, 1);

    let verdict = &analysis.assessments["0xfail"];
    assert!(verdict.factors.contains(&RiskFactor::Failed));
    assert_eq!(verdict.risk_score, 30);
    assert_eq!(verdict.tier, RiskTier::Medium);
    assert!(verdict.is_suspicious);
}

#[test]
fn test_malformed_records_rejected() {
    let mut no_hash = tx("", 20, NOW - 10);
    no_hash.hash = None;
    let mut bad_price = tx("0xbad", 20, NOW - 10);
    bad_price.gas_price = Some(json!("twenty"));
    let records = vec![tx("0xok", 20, NOW - 10), no_hash, bad_price, tx("0xok", 99, NOW - 5)];
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 30, NOW, &registry);

    assert_eq!(analysis.rejected_count, 3);
    assert_eq!(analysis.snapshot.total_count, 1);
    assert!(approx(analysis.snapshot.average_user_gas_price, 20.0));
    assert_eq!(analysis.assessments.len(), 1);
}

#[test]
fn test_wrongly_typed_entries_are_counted() {
    let feed = format!(
        r#"[{}, {{"hash":"0xb","input":7,"gasPrice":"1000000000","gasUsed":"21000","isError":"0","timeStamp":"{}"}},
            {{"hash":12,"gasPrice":"1000000000","gasUsed":"21000","isError":"0","timeStamp":"{}"}}, 42]"#,
        serde_json::to_string(&tx("0xa", 20, NOW - 10)).unwrap(),
        NOW - 10,
        NOW - 10
    );
    let records = parse_feed_str(&feed).unwrap();
    let registry = ScamRegistry::new();

    let analysis = analyze(&records, Some(30.0), Some(3000.0), 0, NOW, &registry);

    assert_eq!(records.len(), 4);
    assert_eq!(analysis.snapshot.total_count, 1);
    assert_eq!(analysis.rejected_count, 3);
}

#[test]
fn test_contract_creation_is_low_risk() {
    let mut deploy = tx("0xdeploy", 20, NOW - 10);
    deploy.to = Some(json!(""));
    deploy.value = Some(json!("0"));
    let registry = ScamRegistry::new();

    let analysis = analyze(&[deploy], Some(30.0), Some(3000.0), 30, NOW, &registry);
    let verdict = &analysis.assessments["0xdeploy"];

    assert_eq!(verdict.risk_score, 25);
    assert_eq!(verdict.tier, RiskTier::Low);
    assert!(!verdict.is_suspicious);
}

#[test]
fn test_scam_destination_is_high_risk() {
    let mut scam = tx("0xscam", 20, NOW - 10);
    scam.to = Some(json!(SCAM.to_uppercase().replace("0X", "0x")));
    let registry: ScamRegistry = [SCAM].into_iter().collect();

    let analysis = analyze(&[scam], Some(30.0), Some(3000.0), 30, NOW, &registry);
    let verdict = &analysis.assessments["0xscam"];

    assert_eq!(verdict.tier, RiskTier::High);
    assert!(verdict.is_suspicious);
    assert!(verdict.factors.contains(&RiskFactor::KnownScamAddress));
    assert_eq!(analysis.suspicious_count, 1);
}

#[test]
fn test_high_value_policy() {
    let mut whale = tx("0xwhale", 20, NOW - 10);
    whale.value = Some(json!("50000000000000000000"));
    let records = [whale];
    let registry = ScamRegistry::new();
    let request = AnalysisRequest::new(&records, &registry, NOW);

    let combined = Analyzer::default().analyze(&request);
    assert!(combined.assessments["0xwhale"].is_suspicious);

    let mut config = AnalyticsConfig::default();
    config.risk.policy = RiskPolicy::Weighted;
    let weighted = Analyzer::new(config).analyze(&request);
    let verdict = &weighted.assessments["0xwhale"];
    assert!(!verdict.is_suspicious);
    assert!(verdict.factors.contains(&RiskFactor::HighValue));
    assert_eq!(verdict.tier, RiskTier::Low);
}

#[test]
fn test_analyzer_keeps_its_config() {
    let mut config = AnalyticsConfig::default();
    config.fallback.fiat_rate = 2000.0;
    config.risk.policy = RiskPolicy::ValueScreen;

    let analyzer = Analyzer::new(config.clone());
    assert_eq!(analyzer.config(), &config);
    assert_eq!(Analyzer::default().config(), &AnalyticsConfig::default());
}

#[test]
fn test_analysis_is_idempotent() {
    let records: Vec<RawTransaction> = (0..20)
        .map(|i| tx(&format!("0x{:02x}", i), 10 + i as u64 * 3, NOW - i * DAY / 3))
        .collect();
    let registry: ScamRegistry = [SCAM].into_iter().collect();

    let first = analyze(&records, Some(25.0), Some(3000.0), 30, NOW, &registry);
    let second = analyze(&records, Some(25.0), Some(3000.0), 30, NOW, &registry);

    assert_eq!(first, second);
}

#[test]
fn test_input_order_does_not_matter() {
    let records = vec![
        tx("0xa", 12, MIDNIGHT + 5),
        tx("0xb", 25, MIDNIGHT - DAY + 5),
        tx("0xc", 40, MIDNIGHT - 2 * DAY + 5),
    ];
    let mut reversed = records.clone();
    reversed.reverse();
    let registry = ScamRegistry::new();

    let forward = analyze(&records, Some(30.0), Some(3000.0), 30, NOW, &registry);
    let backward = analyze(&reversed, Some(30.0), Some(3000.0), 30, NOW, &registry);

    assert_eq!(forward.snapshot.trend, backward.snapshot.trend);
    assert_eq!(forward.assessments, backward.assessments);
}

#[test]
fn test_request_builder_window() {
    let records = vec![tx("0xa", 20, NOW - 2 * DAY), tx("0xb", 20, NOW - 10)];
    let registry = ScamRegistry::new();
    let request = AnalysisRequest::new(&records, &registry, NOW)
        .with_baseline(Some(30.0))
        .with_fiat_rate(Some(3000.0))
        .with_window(Window::Days(1));

    let analysis = Analyzer::default().analyze(&request);

    assert_eq!(analysis.snapshot.total_count, 1);
    assert_eq!(analysis.assessments.len(), 2);
}
