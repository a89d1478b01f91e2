//! Per-instrument classification rules.
//!
//! A [`RuleBook`] maps an instrument symbol to a [`RuleSet`]: an ordered list of
//! `(predicate, label)` rules evaluated top to bottom. Rule books are plain
//! data so thresholds can be loaded from JSON instead of living in code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SignalError};
use crate::models::indicators::IndicatorSpec;
use crate::models::macro_context::MacroField;
use crate::models::signal::SignalLabel;

/// A numeric input to a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Operand {
    Close,
    Volume,
    Indicator(IndicatorSpec),
    Macro(MacroField),
    Constant(f64),
    /// `operand * factor`, e.g. a moving average less a 3% margin.
    Scaled { operand: Box<Operand>, factor: f64 },
}

impl Operand {
    pub fn indicator(spec: IndicatorSpec) -> Self {
        Self::Indicator(spec)
    }

    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::Scaled {
            operand: Box::new(self),
            factor,
        }
    }

    pub fn lt(self, right: Operand) -> Predicate {
        Predicate::compare(self, Comparison::LessThan, right)
    }

    pub fn le(self, right: Operand) -> Predicate {
        Predicate::compare(self, Comparison::LessEqual, right)
    }

    pub fn gt(self, right: Operand) -> Predicate {
        Predicate::compare(self, Comparison::GreaterThan, right)
    }

    pub fn ge(self, right: Operand) -> Predicate {
        Predicate::compare(self, Comparison::GreaterEqual, right)
    }

    fn collect_specs(&self, out: &mut Vec<IndicatorSpec>) {
        match self {
            Self::Indicator(spec) => push_unique(out, *spec),
            Self::Scaled { operand, .. } => operand.collect_specs(out),
            Self::Close | Self::Volume | Self::Macro(_) | Self::Constant(_) => {}
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Indicator(spec) => spec.validate(),
            Self::Constant(v) | Self::Scaled { factor: v, .. } if !v.is_finite() => Err(
                SignalError::Config(format!("non-finite number in operand {:?}", self)),
            ),
            Self::Scaled { operand, .. } => operand.validate(),
            _ => Ok(()),
        }
    }
}

/// Comparison operators. Evaluated exactly as named: `LessEqual` includes the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Comparison {
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl Comparison {
    pub fn apply(self, left: f64, right: f64) -> bool {
        match self {
            Self::LessThan => left < right,
            Self::LessEqual => left <= right,
            Self::GreaterThan => left > right,
            Self::GreaterEqual => left >= right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Predicate {
    Compare {
        left: Operand,
        comparison: Comparison,
        right: Operand,
    },
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn compare(left: Operand, comparison: Comparison, right: Operand) -> Self {
        Self::Compare {
            left,
            comparison,
            right,
        }
    }

    pub fn all(predicates: Vec<Predicate>) -> Self {
        Self::All(predicates)
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Self::Any(predicates)
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    fn collect_specs(&self, out: &mut Vec<IndicatorSpec>) {
        match self {
            Self::Compare { left, right, .. } => {
                left.collect_specs(out);
                right.collect_specs(out);
            }
            Self::All(children) | Self::Any(children) => {
                children.iter().for_each(|c| c.collect_specs(out))
            }
            Self::Not(inner) => inner.collect_specs(out),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Compare { left, right, .. } => {
                left.validate()?;
                right.validate()
            }
            Self::All(children) | Self::Any(children) => {
                children.iter().try_for_each(Predicate::validate)
            }
            Self::Not(inner) => inner.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub label: SignalLabel,
    pub when: Predicate,
}

impl Rule {
    pub fn new(id: impl Into<String>, label: SignalLabel, when: Predicate) -> Self {
        Self {
            id: id.into(),
            label,
            when,
        }
    }
}

/// Ordered rules for one instrument; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Momentum indicator the snapshot must carry for classification to proceed.
    pub momentum: IndicatorSpec,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(momentum: IndicatorSpec, rules: Vec<Rule>) -> Self {
        Self { momentum, rules }
    }

    /// Every indicator referenced by the momentum field or any rule.
    pub fn required_specs(&self) -> Vec<IndicatorSpec> {
        let mut specs = vec![self.momentum];
        for rule in &self.rules {
            rule.when.collect_specs(&mut specs);
        }
        specs
    }

    pub fn validate(&self) -> Result<()> {
        self.momentum.validate()?;
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(SignalError::Config("rule with empty id".to_string()));
            }
            rule.when.validate()?;
        }
        Ok(())
    }
}

/// Instrument symbol → rule set. Symbols are stored upper-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook {
    instruments: BTreeMap<String, RuleSet>,
}

impl RuleBook {
    pub fn empty() -> Self {
        Self {
            instruments: BTreeMap::new(),
        }
    }

    pub fn with_instrument(mut self, symbol: &str, rules: RuleSet) -> Self {
        self.insert(symbol, rules);
        self
    }

    pub fn insert(&mut self, symbol: &str, rules: RuleSet) {
        self.instruments.insert(symbol.to_ascii_uppercase(), rules);
    }

    pub fn get(&self, symbol: &str) -> Option<&RuleSet> {
        self.instruments.get(&symbol.to_ascii_uppercase())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Union of the indicators needed by every instrument.
    pub fn required_specs(&self) -> Vec<IndicatorSpec> {
        let mut specs = Vec::new();
        for rule_set in self.instruments.values() {
            for spec in rule_set.required_specs() {
                push_unique(&mut specs, spec);
            }
        }
        specs
    }

    pub fn validate(&self) -> Result<()> {
        for (symbol, rule_set) in &self.instruments {
            rule_set
                .validate()
                .map_err(|e| SignalError::Config(format!("{}: {}", symbol, e)))?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: RuleBook = serde_json::from_str(json)?;
        // re-key so lookups stay case-insensitive
        let mut book = Self::empty();
        for (symbol, rule_set) in parsed.instruments {
            book.insert(&symbol, rule_set);
        }
        book.validate()?;
        Ok(book)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

fn push_unique(specs: &mut Vec<IndicatorSpec>, spec: IndicatorSpec) {
    if !specs.contains(&spec) {
        specs.push(spec);
    }
}
