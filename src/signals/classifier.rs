//! Instrument-keyed signal classifier.

use tracing::debug;

use crate::error::{Result, SignalError};
use crate::models::{
    Classification, IndicatorSnapshot, IndicatorSpec, MacroContext, RuleBook, RuleSet, SignalLabel,
};
use crate::signals::evaluator::RuleContext;

/// Looks up the instrument's rule set and returns the label of the first
/// matching rule, or `Watch` when none match. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
    rule_book: RuleBook,
}

impl SignalClassifier {
    pub fn new(rule_book: RuleBook) -> Self {
        Self { rule_book }
    }

    pub fn rule_book(&self) -> &RuleBook {
        &self.rule_book
    }

    /// Indicators the engine must compute for every configured instrument.
    pub fn required_specs(&self) -> Vec<IndicatorSpec> {
        self.rule_book.required_specs()
    }

    pub fn supports(&self, symbol: &str) -> bool {
        self.rule_book.get(symbol).is_some()
    }

    pub fn classify(
        &self,
        symbol: &str,
        snapshot: &IndicatorSnapshot,
        macro_context: &MacroContext,
    ) -> Result<SignalLabel> {
        self.classify_explained(symbol, snapshot, macro_context)
            .map(|c| c.label)
    }

    pub fn classify_explained(
        &self,
        symbol: &str,
        snapshot: &IndicatorSnapshot,
        macro_context: &MacroContext,
    ) -> Result<Classification> {
        let rule_set = self
            .rule_book
            .get(symbol)
            .ok_or_else(|| SignalError::UnsupportedInstrument(symbol.to_string()))?;

        check_structure(symbol, snapshot, rule_set)?;

        let context = RuleContext::new(snapshot, macro_context);
        let classification = match context.first_match(&rule_set.rules) {
            Some(rule) => Classification::matched(rule.label, rule.id.clone()),
            None => Classification::default_watch(),
        };

        debug!(
            symbol = %symbol,
            label = ?classification.label,
            rule = ?classification.rule_id,
            "classified"
        );
        Ok(classification)
    }
}

/// A snapshot must carry a close price and an entry for the momentum
/// indicator. An undefined momentum value is allowed; a missing entry is not.
fn check_structure(symbol: &str, snapshot: &IndicatorSnapshot, rule_set: &RuleSet) -> Result<()> {
    let mut missing = Vec::new();
    if !snapshot.close.is_some_and(f64::is_finite) {
        missing.push("close".to_string());
    }
    if !snapshot.contains(&rule_set.momentum) {
        missing.push(rule_set.momentum.name());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SignalError::InvalidSnapshot {
            symbol: symbol.to_string(),
            missing: missing.join(", "),
        })
    }
}
