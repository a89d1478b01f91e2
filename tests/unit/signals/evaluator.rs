//! Unit tests for predicate evaluation

use etf_signals::models::{
    IndicatorSnapshot, IndicatorSpec, IndicatorValue, MacroContext, MacroField, Operand, Predicate,
};
use etf_signals::signals::RuleContext;

fn snapshot() -> IndicatorSnapshot {
    IndicatorSnapshot::new("VYM")
        .with_close(100.0)
        .with_volume(2_000.0)
        .with_value(IndicatorSpec::sma(75), Some(100.0))
        .with_value(IndicatorSpec::sma(200), IndicatorValue::Undefined)
        .with_value(IndicatorSpec::volume_average(20), Some(1_000.0))
}

#[test]
fn test_less_equal_is_boundary_inclusive() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new();
    let ctx = RuleContext::new(&snapshot, &macro_context);

    assert!(ctx.evaluate(&Operand::Close.le(Operand::indicator(IndicatorSpec::sma(75)))));
    assert!(!ctx.evaluate(&Operand::Close.lt(Operand::indicator(IndicatorSpec::sma(75)))));
}

#[test]
fn test_undefined_operand_is_false_both_ways() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new();
    let ctx = RuleContext::new(&snapshot, &macro_context);
    let ma200 = || Operand::indicator(IndicatorSpec::sma(200));

    assert!(!ctx.evaluate(&Operand::Close.le(ma200())));
    assert!(!ctx.evaluate(&Operand::Close.gt(ma200())));
    // never requested
    assert!(!ctx.evaluate(&Operand::Close.le(Operand::indicator(IndicatorSpec::sma(10)))));
}

#[test]
fn test_missing_macro_field_is_false() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new();
    let ctx = RuleContext::new(&snapshot, &macro_context);
    let rate = Operand::Macro(MacroField::RiskFreeRate);

    assert!(!ctx.evaluate(&rate.clone().gt(Operand::constant(3.8))));
    assert!(!ctx.evaluate(&rate.le(Operand::constant(3.8))));
}

#[test]
fn test_scaled_operand() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new();
    let ctx = RuleContext::new(&snapshot, &macro_context);

    let surge = Operand::Volume.gt(Operand::indicator(IndicatorSpec::volume_average(20)).scaled(1.3));
    assert!(ctx.evaluate(&surge));
    let margin = ctx
        .resolve(&Operand::indicator(IndicatorSpec::sma(75)).scaled(0.97))
        .unwrap();
    assert!((margin - 97.0).abs() < 1e-9);
}

#[test]
fn test_groups_short_circuit_over_undefined() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new().with_risk_free_rate(4.0);
    let ctx = RuleContext::new(&snapshot, &macro_context);

    let undefined = Operand::Close.le(Operand::indicator(IndicatorSpec::sma(200)));
    let holds = Operand::Macro(MacroField::RiskFreeRate).gt(Operand::constant(3.8));

    assert!(ctx.evaluate(&Predicate::any(vec![undefined.clone(), holds.clone()])));
    assert!(!ctx.evaluate(&Predicate::all(vec![undefined, holds])));
    assert!(ctx.evaluate(&Predicate::all(Vec::new())));
    assert!(!ctx.evaluate(&Predicate::any(Vec::new())));
}

#[test]
fn test_yield_spread() {
    let macro_context = MacroContext::new()
        .with_risk_free_rate(4.2)
        .with_market_dividend_yield(1.4);
    assert!((macro_context.yield_spread().unwrap() + 2.8).abs() < 1e-9);
    assert!(MacroContext::new().with_risk_free_rate(4.2).yield_spread().is_none());
}

#[test]
fn test_negated_undefined_comparison_does_not_hold() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new();
    let ctx = RuleContext::new(&snapshot, &macro_context);
    let rate = Operand::Macro(MacroField::RiskFreeRate);
    let ma200 = Operand::indicator(IndicatorSpec::sma(200));

    assert!(!ctx.evaluate(&rate.le(Operand::constant(4.5)).negate()));
    assert!(!ctx.evaluate(&Operand::Close.gt(ma200.clone()).negate()));
    // Kleene: a false child settles All, so its negation is determined.
    let settled = Predicate::all(vec![
        Operand::Close.le(ma200.clone()),
        Operand::Close.gt(Operand::constant(500.0)),
    ]);
    assert!(ctx.evaluate(&settled.negate()));
    let unsettled = Predicate::any(vec![
        Operand::Close.le(ma200),
        Operand::Close.gt(Operand::constant(500.0)),
    ]);
    assert!(!ctx.evaluate(&unsettled));
    assert!(!ctx.evaluate(&unsettled.negate()));
}

#[test]
fn test_negation_of_defined_comparison_flips() {
    let snapshot = snapshot();
    let macro_context = MacroContext::new().with_risk_free_rate(4.8);
    let ctx = RuleContext::new(&snapshot, &macro_context);
    let low_rate = Operand::Macro(MacroField::RiskFreeRate).le(Operand::constant(4.5));

    assert!(!ctx.evaluate(&low_rate));
    assert!(ctx.evaluate(&low_rate.clone().negate()));
    assert!(!ctx.evaluate(&low_rate.negate().negate()));
}
