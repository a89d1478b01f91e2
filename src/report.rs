//! Plain-text and JSON rendering of pipeline results.

use std::fmt::Write;

use crate::error::Result;
use crate::models::{IndicatorSpec, InstrumentReport, MacroContext};
use crate::signals::RunSummary;

const HEADLINE: [IndicatorSpec; 4] = [
    IndicatorSpec::Rsi { period: 14 },
    IndicatorSpec::Sma { window: 50 },
    IndicatorSpec::Sma { window: 200 },
    IndicatorSpec::BollingerLower { window: 20, sigma: 2.0 },
];

fn fmt_opt(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "n/a".to_string(),
    }
}

pub fn render_macro(macro_context: &MacroContext) -> String {
    format!(
        "10Y yield: {} | Market dividend yield: {} | VIX: {}",
        fmt_opt(macro_context.risk_free_rate, "%"),
        fmt_opt(macro_context.market_dividend_yield, "%"),
        fmt_opt(macro_context.volatility_index, ""),
    )
}

pub fn render_instrument(report: &InstrumentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} bars): {}",
        report.symbol,
        report.date,
        report.bars,
        report.label()
    );
    let _ = writeln!(out, "  Price: {:.2} USD", report.latest_price);
    for spec in &HEADLINE {
        let value = report.indicators.value(spec);
        let _ = writeln!(out, "  {}: {}", spec.name(), fmt_opt(value, ""));
    }
    if let Some(dividend_yield) = report.dividend_yield {
        let _ = writeln!(out, "  Trailing dividend yield: {:.2}%", dividend_yield);
    }
    if let Some(rule) = &report.classification.rule_id {
        let _ = writeln!(out, "  Matched rule: {}", rule);
    }
    out
}

pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_macro(&summary.macro_context));
    let _ = writeln!(out);
    for report in &summary.reports {
        let _ = writeln!(out, "{}", render_instrument(report));
    }
    for skipped in &summary.skipped {
        let _ = writeln!(out, "{}: skipped ({})", skipped.symbol, skipped.reason);
    }
    out
}

pub fn render_json(summary: &RunSummary) -> Result<String> {
    let value = serde_json::json!({
        "macro": summary.macro_context,
        "instruments": summary.reports,
        "skipped": summary
            .skipped
            .iter()
            .map(|s| serde_json::json!({ "symbol": s.symbol, "reason": s.reason }))
            .collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
