//! Daily bars and the validated series that feeds the indicator engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64, volume: f64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// Non-empty, strictly date-ascending sequence of daily bars for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, rejecting empty input, unordered or duplicate dates,
    /// non-finite closes and negative volumes.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(SignalError::unavailable(symbol, "no bars returned"));
        }

        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SignalError::InvalidSeries(format!(
                    "{}: bar dated {} does not follow {}",
                    symbol, pair[1].date, pair[0].date
                )));
            }
        }

        if let Some(bad) = bars
            .iter()
            .find(|b| !b.close.is_finite() || !b.volume.is_finite() || b.volume < 0.0)
        {
            return Err(SignalError::InvalidSeries(format!(
                "{}: malformed bar on {} (close={}, volume={})",
                symbol, bad.date, bad.close, bad.volume
            )));
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> &Bar {
        // Constructor guarantees at least one bar.
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}
