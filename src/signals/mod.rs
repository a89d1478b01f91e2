//! Signal classification and the per-instrument pipeline.

pub mod classifier;
pub mod evaluator;
pub mod pipeline;
pub mod rulebook;

pub use classifier::SignalClassifier;
pub use evaluator::RuleContext;
pub use pipeline::{RunSummary, SignalPipeline, SkippedInstrument};
pub use rulebook::{SUPPORTED_SYMBOLS, VOLUME_SURGE_MULTIPLIER};
