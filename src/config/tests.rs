//! Tests for config module.

use super::*;
use crate::risk::{AdvancedField, AdvancedParam, AdvancedValue};
use std::io::Write;
use tempfile::NamedTempFile;

fn minimal_valid_yaml() -> String {
    r#"
app:
  name: riskctl
  env: development

strategies:
  conservative:
    MaxPositions: 3
    BTCETHMaxLeverage: 10
    AltcoinMaxLeverage: 5
    MinRiskRewardRatio: 3.0
    MaxMarginUsage: 0.8
    MaxPositionRatio: 1.5
    MinPositionSize: 12
    MinConfidence: 70
"#
    .to_string()
}

// ==================== YAML field loading tests ====================

#[test]
fn test_load_app_fields() {
    let yaml = minimal_valid_yaml().replace("env: development", "env: production\n  log_level: debug");
    let cfg = Config::from_yaml(&yaml).unwrap();

    assert_eq!(cfg.app.name, "riskctl");
    assert_eq!(cfg.app.env, "production");
    assert_eq!(cfg.app.log_level, Some("debug".to_string()));
}

#[test]
fn test_app_env_defaults_to_development() {
    let yaml = minimal_valid_yaml().replace("  env: development\n", "");
    let cfg = Config::from_yaml(&yaml).unwrap();

    assert_eq!(cfg.app.env, "development");
    assert_eq!(cfg.app.log_level, None);
}

#[test]
fn test_load_basic_fields() {
    let cfg = Config::from_yaml(&minimal_valid_yaml()).unwrap();

    let risk = cfg.strategy("conservative").unwrap();
    assert_eq!(risk.max_positions, 3);
    assert_eq!(risk.btc_eth_max_leverage, 10);
    assert_eq!(risk.altcoin_max_leverage, 5);
    assert_eq!(risk.min_risk_reward_ratio, 3.0);
    assert_eq!(risk.max_margin_usage, 0.8);
    assert_eq!(risk.max_position_ratio, 1.5);
    assert_eq!(risk.min_position_size, 12.0);
    assert_eq!(risk.min_confidence, 70);
    assert_eq!(risk.set_count(), 0);
}

#[test]
fn test_load_advanced_fields() {
    let yaml = format!(
        "{}{}",
        minimal_valid_yaml(),
        r#"    MaxDailyTrades: 0
    TotalLossCircuitBreaker: 0.15
    add_position_ratio: 0.1
"#
    );
    let cfg = Config::from_yaml(&yaml).unwrap();

    let risk = cfg.strategy("conservative").unwrap();
    assert_eq!(risk.max_daily_trades(), Some(0));
    assert_eq!(risk.total_loss_circuit_breaker(), Some(0.15));
    assert_eq!(risk.add_position_ratio(), Some(0.1));
    assert!(!risk.is_set(AdvancedField::BaseCapitalRatio));
}

#[test]
fn test_load_multiple_strategies() {
    let yaml = format!(
        "{}{}",
        minimal_valid_yaml(),
        r#"  aggressive:
    MaxPositions: 6
    BTCETHMaxLeverage: 20
    AltcoinMaxLeverage: 10
    MinRiskRewardRatio: 2.0
    MaxMarginUsage: 0.9
    MaxPositionRatio: 3.0
    MinPositionSize: 10
    MinConfidence: 60
    BaseCapitalRatio: 0.05
"#
    );
    let cfg = Config::from_yaml(&yaml).unwrap();

    let names: Vec<_> = cfg.strategies.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["aggressive", "conservative"]);

    let aggressive = cfg.strategy("aggressive").unwrap();
    assert_eq!(
        aggressive.get(AdvancedField::BaseCapitalRatio).unwrap(),
        AdvancedValue::Float(0.05)
    );
    assert!(cfg.strategy("missing").is_none());
}

// ==================== Parse error tests ====================

#[test]
fn test_missing_basic_field_fails_parse() {
    let yaml = minimal_valid_yaml().replace("    MinConfidence: 70\n", "");
    let err = Config::from_yaml(&yaml).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("MinConfidence"));
}

#[test]
fn test_mistyped_advanced_field_fails_parse() {
    let yaml = format!("{}    MaxDailyTrades: many\n", minimal_valid_yaml());
    let err = Config::from_yaml(&yaml).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
}

// ==================== Validation tests ====================

#[test]
fn test_validate_empty_name() {
    let yaml = minimal_valid_yaml().replace("name: riskctl", "name: \"\"");
    let err = Config::from_yaml(&yaml).unwrap_err();

    assert!(err.to_string().contains("app.name is required"));
}

#[test]
fn test_validate_no_strategies() {
    let yaml = r#"
app:
  name: riskctl

strategies: {}
"#;
    let err = Config::from_yaml(yaml).unwrap_err();

    assert!(err.to_string().contains("at least one strategy is required"));
}

#[test]
fn test_violations_are_reported_not_rejected() {
    let yaml = minimal_valid_yaml().replace("MaxMarginUsage: 0.8", "MaxMarginUsage: 1.8");
    let cfg = Config::from_yaml(&yaml).unwrap();

    let violations = cfg.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].0, "conservative");
    assert_eq!(violations[0].1.field, "MaxMarginUsage");
}

// ==================== File loading tests ====================

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(minimal_valid_yaml().as_bytes()).unwrap();

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.app.name, "riskctl");
    assert_eq!(cfg.strategies.len(), 1);
}

#[test]
fn test_load_log_level_from_env() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(minimal_valid_yaml().as_bytes()).unwrap();

    unsafe {
        env::set_var("RISKCTL_LOG_LEVEL", "trace");
    }

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.app.log_level, Some("trace".to_string()));

    // Cleanup
    unsafe {
        env::remove_var("RISKCTL_LOG_LEVEL");
    }
}

#[test]
fn test_load_nonexistent_file() {
    let result = Config::load("nonexistent_config.yaml");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("failed to read config file"));
}

#[test]
fn test_load_risk_blob() {
    let cfg = RiskControlConfig::new(crate::risk::BasicLimits {
        max_positions: 3,
        btc_eth_max_leverage: 10,
        altcoin_max_leverage: 5,
        min_risk_reward_ratio: 3.0,
        max_margin_usage: 0.8,
        max_position_ratio: 1.5,
        min_position_size: 12.0,
        min_confidence: 70,
    })
    .with(AdvancedParam::MaxDailyTrades(0));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(cfg.encode().unwrap().as_bytes()).unwrap();

    let loaded = load_risk_blob(file.path().to_str().unwrap()).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn test_load_risk_blob_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"MaxPositions": 3}"#).unwrap();

    let err = load_risk_blob(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Risk(crate::risk::RiskConfigError::Malformed(_))));
    assert!(err.to_string().contains("failed to decode risk control config"));
}
