//! Predicate evaluation against one snapshot and the macro context.
//!
//! Any comparison touching an undefined value is undetermined and never holds,
//! even under negation, so missing history or missing macro inputs can only
//! push the outcome toward `Watch`.

use tracing::trace;

use crate::models::{IndicatorSnapshot, MacroContext, Operand, Predicate, Rule};

pub struct RuleContext<'a> {
    snapshot: &'a IndicatorSnapshot,
    macro_context: &'a MacroContext,
}

impl<'a> RuleContext<'a> {
    pub fn new(snapshot: &'a IndicatorSnapshot, macro_context: &'a MacroContext) -> Self {
        Self {
            snapshot,
            macro_context,
        }
    }

    /// Numeric value of an operand, `None` when any input is undefined.
    pub fn resolve(&self, operand: &Operand) -> Option<f64> {
        let value = match operand {
            Operand::Close => self.snapshot.close,
            Operand::Volume => self.snapshot.volume,
            Operand::Indicator(spec) => self.snapshot.value(spec),
            Operand::Macro(field) => self.macro_context.get(*field),
            Operand::Constant(v) => Some(*v),
            Operand::Scaled { operand, factor } => self.resolve(operand).map(|v| v * factor),
        };
        value.filter(|v| v.is_finite())
    }

    /// Whether the predicate holds. An undetermined result does not hold.
    pub fn evaluate(&self, predicate: &Predicate) -> bool {
        self.eval(predicate).unwrap_or(false)
    }

    /// Three-valued evaluation: `None` when the outcome depends on an
    /// undefined operand. `Not` keeps `None`, so negation never turns missing
    /// data into a match. `All` and `Any` follow Kleene logic.
    fn eval(&self, predicate: &Predicate) -> Option<bool> {
        match predicate {
            Predicate::Compare {
                left,
                comparison,
                right,
            } => match (self.resolve(left), self.resolve(right)) {
                (Some(l), Some(r)) => Some(comparison.apply(l, r)),
                _ => {
                    trace!(
                        symbol = %self.snapshot.symbol,
                        ?left,
                        ?right,
                        "comparison against undefined operand is undetermined"
                    );
                    None
                }
            },
            Predicate::All(children) => {
                let mut undetermined = false;
                for child in children {
                    match self.eval(child) {
                        Some(false) => return Some(false),
                        None => undetermined = true,
                        Some(true) => {}
                    }
                }
                (!undetermined).then_some(true)
            }
            Predicate::Any(children) => {
                let mut undetermined = false;
                for child in children {
                    match self.eval(child) {
                        Some(true) => return Some(true),
                        None => undetermined = true,
                        Some(false) => {}
                    }
                }
                (!undetermined).then_some(false)
            }
            Predicate::Not(inner) => self.eval(inner).map(|b| !b),
        }
    }

    /// First rule whose predicate holds.
    pub fn first_match<'r>(&self, rules: &'r [Rule]) -> Option<&'r Rule> {
        rules.iter().find(|rule| self.evaluate(&rule.when))
    }
}
