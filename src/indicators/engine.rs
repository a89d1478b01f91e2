//! Indicator engine: turns a price series into a latest-row snapshot and,
//! optionally, the full derived table for display.

use tracing::debug;

use crate::error::Result;
use crate::indicators::momentum::{calculate_rsi, calculate_rsi_series};
use crate::indicators::trend::{calculate_sma, calculate_sma_series};
use crate::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_series};
use crate::indicators::volume::{calculate_volume_average, calculate_volume_average_series};
use crate::models::{Bar, IndicatorSnapshot, IndicatorSpec, IndicatorTable, IndicatorValue, PriceSeries};

/// Indicators shown on the report regardless of what the rules need.
pub fn display_specs() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::rsi(14),
        IndicatorSpec::sma(25),
        IndicatorSpec::sma(50),
        IndicatorSpec::sma(75),
        IndicatorSpec::sma(200),
        IndicatorSpec::bollinger_lower(20, 1.0),
        IndicatorSpec::bollinger_lower(20, 1.5),
        IndicatorSpec::bollinger_lower(20, 2.0),
        IndicatorSpec::bollinger_upper(20, 2.0),
        IndicatorSpec::volume_average(20),
    ]
}

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    specs: Vec<IndicatorSpec>,
}

impl IndicatorEngine {
    /// Create an engine for the requested indicators. Duplicates are dropped;
    /// invalid parameters are rejected.
    pub fn new(specs: impl IntoIterator<Item = IndicatorSpec>) -> Result<Self> {
        let mut unique: Vec<IndicatorSpec> = Vec::new();
        for spec in specs {
            spec.validate()?;
            if !unique.contains(&spec) {
                unique.push(spec);
            }
        }
        Ok(Self { specs: unique })
    }

    pub fn specs(&self) -> &[IndicatorSpec] {
        &self.specs
    }

    /// Whether `series` is long enough for `spec` to be defined at its latest bar.
    pub fn is_defined(spec: &IndicatorSpec, series: &PriceSeries) -> bool {
        series.len() >= spec.required_bars()
    }

    /// Value of one indicator at the last bar of `bars`.
    pub fn compute(spec: &IndicatorSpec, bars: &[Bar]) -> IndicatorValue {
        let value = match *spec {
            IndicatorSpec::Rsi { period } => calculate_rsi(bars, period),
            IndicatorSpec::Sma { window } => calculate_sma(bars, window),
            IndicatorSpec::BollingerUpper { window, sigma } => {
                calculate_bollinger_bands(bars, window, sigma).map(|b| b.upper)
            }
            IndicatorSpec::BollingerLower { window, sigma } => {
                calculate_bollinger_bands(bars, window, sigma).map(|b| b.lower)
            }
            IndicatorSpec::VolumeAverage { window } => calculate_volume_average(bars, window),
        };
        IndicatorValue::from(value)
    }

    /// Full column for one indicator, aligned with `bars`.
    pub fn compute_series(spec: &IndicatorSpec, bars: &[Bar]) -> Vec<IndicatorValue> {
        let column = match *spec {
            IndicatorSpec::Rsi { period } => calculate_rsi_series(bars, period),
            IndicatorSpec::Sma { window } => calculate_sma_series(bars, window),
            IndicatorSpec::BollingerUpper { window, sigma } => {
                calculate_bollinger_series(bars, window, sigma)
                    .into_iter()
                    .map(|b| b.map(|b| b.upper))
                    .collect()
            }
            IndicatorSpec::BollingerLower { window, sigma } => {
                calculate_bollinger_series(bars, window, sigma)
                    .into_iter()
                    .map(|b| b.map(|b| b.lower))
                    .collect()
            }
            IndicatorSpec::VolumeAverage { window } => {
                calculate_volume_average_series(bars, window)
            }
        };
        column.into_iter().map(IndicatorValue::from).collect()
    }

    /// Snapshot of every requested indicator at the latest bar.
    pub fn snapshot(&self, series: &PriceSeries) -> IndicatorSnapshot {
        let latest = series.latest();
        let mut snapshot = IndicatorSnapshot::new(series.symbol())
            .with_date(latest.date)
            .with_close(latest.close)
            .with_volume(latest.volume);

        for spec in &self.specs {
            let value = Self::compute(spec, series.bars());
            if !value.is_defined() {
                debug!(
                    symbol = %series.symbol(),
                    indicator = %spec.name(),
                    bars = series.len(),
                    required = spec.required_bars(),
                    "indicator undefined: insufficient history"
                );
            }
            snapshot.insert(*spec, value);
        }

        snapshot
    }

    /// Every requested indicator across the whole series.
    pub fn table(&self, series: &PriceSeries) -> IndicatorTable {
        let mut table = IndicatorTable::new(series.symbol(), series.dates(), series.closes());
        for spec in &self.specs {
            table.insert(*spec, Self::compute_series(spec, series.bars()));
        }
        table
    }
}
