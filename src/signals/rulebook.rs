//! Built-in rule sets for the supported funds.
//!
//! Covered-call and dividend funds share one shape: a bargain tier (price at or
//! below MA75, RSI oversold, price at or below the 2σ band), a moderate tier
//! and a mild tier whose thresholds vary per fund. TLT is rate driven.

use crate::models::{IndicatorSpec, MacroField, Operand, Predicate, Rule, RuleBook, RuleSet, SignalLabel};

const RSI: IndicatorSpec = IndicatorSpec::Rsi { period: 14 };
const MA25: IndicatorSpec = IndicatorSpec::Sma { window: 25 };
const MA75: IndicatorSpec = IndicatorSpec::Sma { window: 75 };
const BB_1SIGMA: IndicatorSpec = IndicatorSpec::BollingerLower { window: 20, sigma: 1.0 };
const BB_1_5SIGMA: IndicatorSpec = IndicatorSpec::BollingerLower { window: 20, sigma: 1.5 };
const BB_2SIGMA: IndicatorSpec = IndicatorSpec::BollingerLower { window: 20, sigma: 2.0 };
const VOL_MA20: IndicatorSpec = IndicatorSpec::VolumeAverage { window: 20 };

/// Latest volume must exceed its 20-day average by this factor.
pub const VOLUME_SURGE_MULTIPLIER: f64 = 1.3;

pub const SUPPORTED_SYMBOLS: [&str; 4] = ["VYM", "JEPQ", "JEPI", "TLT"];

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook::builtin()
    }
}

impl RuleBook {
    pub fn builtin() -> Self {
        RuleBook::empty()
            .with_instrument("VYM", vym())
            .with_instrument("JEPQ", jepq())
            .with_instrument("JEPI", jepi())
            .with_instrument("TLT", tlt())
    }
}

fn close() -> Operand {
    Operand::Close
}

fn ind(spec: IndicatorSpec) -> Operand {
    Operand::indicator(spec)
}

fn rsi_below(threshold: f64) -> Predicate {
    ind(RSI).lt(Operand::constant(threshold))
}

fn volume_surge() -> Predicate {
    Operand::Volume.gt(ind(VOL_MA20).scaled(VOLUME_SURGE_MULTIPLIER))
}

fn rate_above(threshold: f64) -> Predicate {
    Operand::Macro(MacroField::RiskFreeRate).gt(Operand::constant(threshold))
}

fn bargain() -> Rule {
    Rule::new(
        "bargain",
        SignalLabel::Bargain,
        Predicate::all(vec![
            close().le(ind(MA75)),
            rsi_below(30.0),
            close().le(ind(BB_2SIGMA)),
        ]),
    )
}

fn moderate(momentum: Predicate) -> Rule {
    Rule::new(
        "moderate_pullback",
        SignalLabel::ModeratePullback,
        Predicate::any(vec![close().le(ind(MA75)), momentum]),
    )
}

fn mild(conditions: Vec<Predicate>) -> Rule {
    Rule::new("mild_pullback", SignalLabel::MildPullback, Predicate::all(conditions))
}

fn vym() -> RuleSet {
    RuleSet::new(
        RSI,
        vec![
            bargain(),
            moderate(Predicate::all(vec![rsi_below(30.0), close().le(ind(BB_1_5SIGMA))])),
            mild(vec![
                close().lt(ind(MA25).scaled(0.97)),
                rsi_below(35.0),
                close().le(ind(BB_1_5SIGMA)),
            ]),
        ],
    )
}

fn jepq() -> RuleSet {
    RuleSet::new(
        RSI,
        vec![
            bargain(),
            moderate(Predicate::all(vec![rsi_below(35.0), close().le(ind(BB_1_5SIGMA))])),
            mild(vec![
                close().lt(ind(MA25).scaled(0.97)),
                rsi_below(40.0),
                close().le(ind(BB_1SIGMA)),
                volume_surge(),
            ]),
        ],
    )
}

fn jepi() -> RuleSet {
    RuleSet::new(
        RSI,
        vec![
            bargain(),
            moderate(Predicate::all(vec![
                rsi_below(40.0),
                close().le(ind(BB_1_5SIGMA)),
                volume_surge(),
            ])),
            mild(vec![
                close().lt(ind(MA25).scaled(0.98)),
                rsi_below(45.0),
                close().le(ind(BB_1SIGMA)),
            ]),
        ],
    )
}

fn tlt() -> RuleSet {
    RuleSet::new(
        RSI,
        vec![
            Rule::new(
                "bargain",
                SignalLabel::Bargain,
                Predicate::all(vec![rate_above(4.5), close().lt(ind(MA75))]),
            ),
            Rule::new("moderate_pullback", SignalLabel::ModeratePullback, rate_above(4.2)),
            Rule::new("mild_pullback", SignalLabel::MildPullback, rate_above(3.8)),
        ],
    )
}
