//! Per-instrument pipeline: fetch → indicators → classification.

use tracing::{info, warn};

use crate::error::{Result, SignalError};
use crate::indicators::{display_specs, IndicatorEngine};
use crate::models::{InstrumentReport, MacroContext};
use crate::services::macro_data::fetch_macro_context;
use crate::services::market_data::MarketDataProvider;
use crate::signals::classifier::SignalClassifier;

/// Instrument skipped because its data could not be fetched.
#[derive(Debug, Clone)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub macro_context: MacroContext,
    pub reports: Vec<InstrumentReport>,
    pub skipped: Vec<SkippedInstrument>,
}

pub struct SignalPipeline<'a> {
    provider: &'a dyn MarketDataProvider,
    engine: IndicatorEngine,
    classifier: SignalClassifier,
    lookback_days: u32,
}

impl<'a> SignalPipeline<'a> {
    /// The engine computes the display indicators plus everything the rule book references.
    pub fn new(
        provider: &'a dyn MarketDataProvider,
        classifier: SignalClassifier,
        lookback_days: u32,
    ) -> Result<Self> {
        let engine = IndicatorEngine::new(
            display_specs()
                .into_iter()
                .chain(classifier.required_specs()),
        )?;

        Ok(Self {
            provider,
            engine,
            classifier,
            lookback_days,
        })
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    /// Evaluate a single instrument against an already-fetched macro context.
    pub async fn evaluate(&self, symbol: &str, macro_context: &MacroContext) -> Result<InstrumentReport> {
        if !self.classifier.supports(symbol) {
            return Err(SignalError::UnsupportedInstrument(symbol.to_string()));
        }

        let series = self.provider.daily_bars(symbol, self.lookback_days).await?;
        let snapshot = self.engine.snapshot(&series);
        let classification = self
            .classifier
            .classify_explained(symbol, &snapshot, macro_context)?;

        let dividend_yield = match self.provider.trailing_dividend_yield(symbol).await {
            Ok(value) => value,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "dividend yield unavailable");
                None
            }
        };

        let latest = series.latest();
        info!(
            symbol = %symbol,
            date = %latest.date,
            close = latest.close,
            label = ?classification.label,
            "instrument evaluated"
        );

        Ok(InstrumentReport {
            symbol: series.symbol().to_string(),
            date: latest.date,
            latest_price: latest.close,
            bars: series.len(),
            indicators: snapshot,
            classification,
            macro_context: *macro_context,
            dividend_yield,
        })
    }

    /// Fetch the macro context once, then evaluate each symbol in order.
    /// Unavailable data skips the symbol; any other error ends the run.
    pub async fn run(&self, symbols: &[String]) -> Result<RunSummary> {
        let macro_context = fetch_macro_context(self.provider).await;
        let mut reports = Vec::with_capacity(symbols.len());
        let mut skipped = Vec::new();

        for symbol in symbols {
            match self.evaluate(symbol, &macro_context).await {
                Ok(report) => reports.push(report),
                Err(e) if e.is_skippable() => {
                    warn!(symbol = %symbol, error = %e, "skipping instrument");
                    skipped.push(SkippedInstrument {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(RunSummary {
            macro_context,
            reports,
            skipped,
        })
    }
}
