//! Integration tests for the signal pipeline.

use etf_signals::models::{IndicatorSpec, MacroContext, SignalLabel};
use etf_signals::report;
use etf_signals::signals::{SignalClassifier, SignalPipeline};
use etf_signals::SignalError;
use serde_json::Value;

use crate::test_utils::{falling, flat, StubProvider};

fn provider() -> StubProvider {
    StubProvider::new()
        .with_closes("VYM", falling(260))
        .with_closes("TLT", flat(260, 90.0))
        .with_closes("^TNX", flat(30, 4.6))
        .with_yield("SPY", 1.3)
        .with_yield("VYM", 2.9)
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn run_classifies_and_skips_unavailable_symbols() {
    let provider = provider();
    let pipeline = SignalPipeline::new(&provider, SignalClassifier::default(), 400).unwrap();

    let summary = pipeline.run(&symbols(&["VYM", "JEPQ", "TLT"])).await.unwrap();

    assert_eq!(summary.macro_context.risk_free_rate, Some(4.6));
    assert_eq!(summary.macro_context.market_dividend_yield, Some(1.3));
    assert_eq!(summary.macro_context.volatility_index, None);

    assert_eq!(summary.reports.len(), 2);
    let vym = &summary.reports[0];
    assert_eq!(vym.symbol, "VYM");
    assert_eq!(vym.label(), SignalLabel::ModeratePullback);
    assert_eq!(vym.dividend_yield, Some(2.9));
    assert_eq!(vym.bars, 260);
    assert!(vym.indicators.value(&IndicatorSpec::sma(200)).is_some());

    let tlt = &summary.reports[1];
    assert_eq!(tlt.symbol, "TLT");
    // flat price is not strictly below MA75, so the top rate band does not apply
    assert_eq!(tlt.label(), SignalLabel::ModeratePullback);
    assert_eq!(tlt.dividend_yield, None);

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].symbol, "JEPQ");
}

#[tokio::test]
async fn evaluate_uses_supplied_macro_context() {
    let provider = provider();
    let pipeline = SignalPipeline::new(&provider, SignalClassifier::default(), 400).unwrap();

    let calm = pipeline.evaluate("TLT", &MacroContext::new()).await.unwrap();
    assert_eq!(calm.label(), SignalLabel::Watch);
    assert!(calm.classification.rule_id.is_none());

    let rising = pipeline
        .evaluate("TLT", &MacroContext::new().with_risk_free_rate(3.9))
        .await
        .unwrap();
    assert_eq!(rising.label(), SignalLabel::MildPullback);
    assert_eq!(rising.classification.rule_id.as_deref(), Some("mild_pullback"));
}

#[tokio::test]
async fn unsupported_symbol_ends_the_run() {
    let provider = provider();
    let pipeline = SignalPipeline::new(&provider, SignalClassifier::default(), 400).unwrap();

    let err = pipeline.run(&symbols(&["VYM", "QQQ"])).await.unwrap_err();
    assert!(matches!(err, SignalError::UnsupportedInstrument(ref s) if s == "QQQ"));
}

#[tokio::test]
async fn reports_render_as_text_and_json() {
    let provider = provider();
    let pipeline = SignalPipeline::new(&provider, SignalClassifier::default(), 400).unwrap();
    let summary = pipeline.run(&symbols(&["VYM", "JEPQ"])).await.unwrap();

    let text = report::render_text(&summary);
    assert!(text.contains("10Y yield: 4.60%"));
    assert!(text.contains("VIX: n/a"));
    assert!(text.contains("VYM"));
    assert!(text.contains("Moderate pullback"));
    assert!(text.contains("JEPQ: skipped"));

    let json: Value = serde_json::from_str(&report::render_json(&summary).unwrap()).unwrap();
    assert_eq!(json["instruments"].as_array().unwrap().len(), 1);
    assert_eq!(json["instruments"][0]["classification"]["label"], "ModeratePullback");
    assert_eq!(json["instruments"][0]["indicators"]["values"]["RSI14"], 0.0);
    assert!(json["macro"]["volatility_index"].is_null());
    assert_eq!(json["skipped"][0]["symbol"], "JEPQ");
}
