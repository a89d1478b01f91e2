//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod macro_context;
pub mod rules;
pub mod series;
pub mod signal;

pub use indicators::{IndicatorSnapshot, IndicatorSpec, IndicatorTable, IndicatorValue};
pub use macro_context::{MacroContext, MacroField};
pub use rules::{Comparison, Operand, Predicate, Rule, RuleBook, RuleSet};
pub use series::{Bar, PriceSeries};
pub use signal::{Classification, InstrumentReport, SignalLabel};
