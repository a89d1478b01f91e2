//! Unit tests for configuration

use std::collections::HashMap;
use std::time::Duration;

use etf_signals::config::{AppConfig, ReportFormat, DEFAULT_LOOKBACK_DAYS};
use etf_signals::SignalError;

fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig, SignalError> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = from_pairs(&[]).unwrap();
    assert_eq!(config.symbols, vec!["VYM", "JEPQ", "JEPI", "TLT"]);
    assert_eq!(config.lookback_days, DEFAULT_LOOKBACK_DAYS);
    assert_eq!(config.provider.retries, 3);
    assert_eq!(config.provider.timeout, Duration::from_secs(10));
    assert_eq!(config.report_format, ReportFormat::Text);
    assert!(config.rulebook_path.is_none());
    assert_eq!(config.load_rule_book().unwrap().len(), 4);
}

#[test]
fn test_overrides() {
    let config = from_pairs(&[
        ("SIGNAL_SYMBOLS", " vym, tlt ,"),
        ("LOOKBACK_DAYS", "500"),
        ("FETCH_RETRIES", "1"),
        ("HTTP_TIMEOUT_SECONDS", "3"),
        ("REPORT_FORMAT", "JSON"),
        ("YAHOO_BASE_URL", "http://localhost:9000"),
    ])
    .unwrap();
    assert_eq!(config.symbols, vec!["VYM", "TLT"]);
    assert_eq!(config.lookback_days, 500);
    assert_eq!(config.provider.retries, 1);
    assert_eq!(config.provider.timeout, Duration::from_secs(3));
    assert_eq!(config.report_format, ReportFormat::Json);
    assert_eq!(config.provider.base_url, "http://localhost:9000");
}

#[test]
fn test_invalid_values_are_config_errors() {
    assert!(matches!(
        from_pairs(&[("LOOKBACK_DAYS", "soon")]),
        Err(SignalError::Config(_))
    ));
    assert!(matches!(
        from_pairs(&[("LOOKBACK_DAYS", "0")]),
        Err(SignalError::Config(_))
    ));
    assert!(matches!(
        from_pairs(&[("REPORT_FORMAT", "html")]),
        Err(SignalError::Config(_))
    ));
    assert!(matches!(
        from_pairs(&[("SIGNAL_SYMBOLS", " , ")]),
        Err(SignalError::Config(_))
    ));
}

#[test]
fn test_missing_rulebook_file_is_io_error() {
    let config = from_pairs(&[("RULEBOOK_PATH", "/nonexistent/rules.json")]).unwrap();
    assert!(matches!(config.load_rule_book(), Err(SignalError::Io(_))));
}
