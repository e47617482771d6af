use wallet_analytics::parser::{RiskFactor, RiskTier, TransactionRecord};
use wallet_analytics::risk::{assess, assess_all, count_suspicious, tier_for_score, ScamRegistry};
use wallet_analytics::utils::config::{RiskConfig, RiskPolicy};

fn record(hash: &str) -> TransactionRecord {
    TransactionRecord {
        hash: hash.to_string(),
        from: "0xaaaa".to_string(),
        to: Some("0xbbbb".to_string()),
        value_native: 0.5,
        gas_price: 20.0,
        gas_used: 21_000,
        timestamp: 1_700_000_000,
        failed: false,
        input_non_empty: false,
    }
}

#[test]
fn test_plain_transfer_is_clean() {
    let verdict = assess(&record("0x1"), &ScamRegistry::new(), &RiskConfig::default());

    assert_eq!(verdict.risk_score, 0);
    assert_eq!(verdict.tier, RiskTier::Low);
    assert!(!verdict.is_suspicious);
    assert!(verdict.factors.is_empty());
}

#[test]
fn test_weights_accumulate() {
    let mut r = record("0x1");
    r.failed = true;
    r.value_native = 0.00001;
    r.gas_price = 250.0;

    let verdict = assess(&r, &ScamRegistry::new(), &RiskConfig::default());

    assert_eq!(verdict.risk_score, 75);
    assert_eq!(verdict.tier, RiskTier::High);
    assert_eq!(
        verdict.factors,
        vec![RiskFactor::Failed, RiskFactor::DustValue, RiskFactor::HighGasPrice]
    );
}

#[test]
fn test_score_capped_at_100() {
    let mut r = record("0x1");
    r.failed = true;
    r.value_native = 0.00001;
    r.to = None;
    r.gas_price = 500.0;

    let verdict = assess(&r, &ScamRegistry::new(), &RiskConfig::default());

    // 30 + 20 + 25 + 25
    assert_eq!(verdict.risk_score, 100);
}

#[test]
fn test_gas_ceiling_is_strict() {
    let mut r = record("0x1");
    r.gas_price = 200.0;

    let verdict = assess(&r, &ScamRegistry::new(), &RiskConfig::default());
    assert!(!verdict.factors.contains(&RiskFactor::HighGasPrice));
}

#[test]
fn test_zero_value_is_not_dust() {
    let mut r = record("0x1");
    r.value_native = 0.0;

    let verdict = assess(&r, &ScamRegistry::new(), &RiskConfig::default());
    assert!(!verdict.factors.contains(&RiskFactor::DustValue));
}

#[test]
fn test_scam_match_forces_high_tier() {
    let registry: ScamRegistry = ["0xBBBB"].into_iter().collect();

    let verdict = assess(&record("0x1"), &registry, &RiskConfig::default());

    assert_eq!(verdict.tier, RiskTier::High);
    assert_eq!(verdict.risk_score, 0);
    assert!(verdict.is_suspicious);
}

#[test]
fn test_tier_cutoffs() {
    let config = RiskConfig::default();

    assert_eq!(tier_for_score(29, &config), RiskTier::Low);
    assert_eq!(tier_for_score(30, &config), RiskTier::Medium);
    assert_eq!(tier_for_score(49, &config), RiskTier::Medium);
    assert_eq!(tier_for_score(50, &config), RiskTier::High);
}

#[test]
fn test_policies_differ_only_in_flag() {
    let mut failed = record("0x1");
    failed.failed = true;
    let mut whale = record("0x2");
    whale.value_native = 25.0;

    let registry = ScamRegistry::new();
    let verdict = |r: &TransactionRecord, policy: RiskPolicy| {
        let config = RiskConfig {
            policy,
            ..RiskConfig::default()
        };
        assess(r, &registry, &config)
    };

    // Medium tier from a revert
    assert!(verdict(&failed, RiskPolicy::Weighted).is_suspicious);
    assert!(!verdict(&failed, RiskPolicy::ValueScreen).is_suspicious);
    assert!(verdict(&failed, RiskPolicy::Combined).is_suspicious);

    // Large transfer, nothing else
    assert!(!verdict(&whale, RiskPolicy::Weighted).is_suspicious);
    assert!(verdict(&whale, RiskPolicy::ValueScreen).is_suspicious);
    assert!(verdict(&whale, RiskPolicy::Combined).is_suspicious);

    assert_eq!(
        verdict(&failed, RiskPolicy::Weighted).risk_score,
        verdict(&failed, RiskPolicy::ValueScreen).risk_score
    );
}

#[test]
fn test_assess_all_keyed_by_hash() {
    let mut bad = record("0xb");
    bad.failed = true;
    let records = vec![record("0xc"), bad, record("0xa")];

    let assessments = assess_all(&records, &ScamRegistry::new(), &RiskConfig::default());

    let keys: Vec<&str> = assessments.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["0xa", "0xb", "0xc"]);
    assert_eq!(count_suspicious(&assessments), 1);
}

#[test]
fn test_registry_formats() {
    let array = ScamRegistry::parse(r#"["0xAAA", "0xbbb"]"#).unwrap();
    assert_eq!(array.len(), 2);
    assert!(array.contains("0xaaa"));

    let object = ScamRegistry::parse(r#"{"success": true, "result": {"0xCCC": [], "0xddd": []}}"#)
        .unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains("0xccc"));

    let lines = ScamRegistry::parse("# scams\n0xeee\n\n0xfff  # reported\n").unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains("0xFFF"));
}

#[test]
fn test_registry_rejects_broken_json() {
    assert!(ScamRegistry::parse(r#"["0xAA", "0xBB""#).is_err());
    assert!(ScamRegistry::parse(r#"{"0xAA": [], "0xBB"#).is_err());

    // Leading whitespace does not turn a JSON export into plain text
    let padded = ScamRegistry::parse("\n  [\"0xAA\"]").unwrap();
    assert_eq!(padded.len(), 1);
}
