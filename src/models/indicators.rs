//! Indicator identities and computed values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SignalError};

/// A requested indicator together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "PascalCase")]
pub enum IndicatorSpec {
    Rsi { period: u32 },
    Sma { window: u32 },
    BollingerUpper { window: u32, sigma: f64 },
    BollingerLower { window: u32, sigma: f64 },
    VolumeAverage { window: u32 },
}

impl IndicatorSpec {
    pub fn rsi(period: u32) -> Self {
        Self::Rsi { period }
    }

    pub fn sma(window: u32) -> Self {
        Self::Sma { window }
    }

    pub fn bollinger_lower(window: u32, sigma: f64) -> Self {
        Self::BollingerLower { window, sigma }
    }

    pub fn bollinger_upper(window: u32, sigma: f64) -> Self {
        Self::BollingerUpper { window, sigma }
    }

    pub fn volume_average(window: u32) -> Self {
        Self::VolumeAverage { window }
    }

    /// Canonical snapshot key, e.g. `RSI14`, `MA50`, `BB20_lower_1_5sigma`, `VOL_MA20`.
    pub fn name(&self) -> String {
        match self {
            Self::Rsi { period } => format!("RSI{}", period),
            Self::Sma { window } => format!("MA{}", window),
            Self::BollingerUpper { window, sigma } => {
                format!("BB{}_upper_{}sigma", window, sigma_label(*sigma))
            }
            Self::BollingerLower { window, sigma } => {
                format!("BB{}_lower_{}sigma", window, sigma_label(*sigma))
            }
            Self::VolumeAverage { window } => format!("VOL_MA{}", window),
        }
    }

    /// Number of bars needed before the indicator is defined.
    pub fn required_bars(&self) -> usize {
        match self {
            // period deltas need one extra bar
            Self::Rsi { period } => *period as usize + 1,
            Self::Sma { window }
            | Self::BollingerUpper { window, .. }
            | Self::BollingerLower { window, .. }
            | Self::VolumeAverage { window } => *window as usize,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = match self {
            Self::Rsi { period } => *period > 0,
            Self::Sma { window } | Self::VolumeAverage { window } => *window > 0,
            Self::BollingerUpper { window, sigma } | Self::BollingerLower { window, sigma } => {
                *window >= 2 && sigma.is_finite() && *sigma >= 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(SignalError::Config(format!(
                "invalid indicator parameters: {:?}",
                self
            )))
        }
    }
}

fn sigma_label(sigma: f64) -> String {
    format!("{}", sigma).replace('.', "_")
}

/// Explicit defined/undefined wrapper. `Undefined` means insufficient history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum IndicatorValue {
    Defined(f64),
    Undefined,
}

impl IndicatorValue {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl From<Option<f64>> for IndicatorValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Defined(v),
            _ => Self::Undefined,
        }
    }
}

impl From<IndicatorValue> for Option<f64> {
    fn from(value: IndicatorValue) -> Self {
        value.value()
    }
}

/// Latest-row view of one instrument: close, volume and each requested indicator.
///
/// A key that is absent was never requested; a key mapped to `Undefined` was
/// requested but lacked history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    #[serde(default)]
    values: BTreeMap<String, IndicatorValue>,
}

impl IndicatorSnapshot {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            date: None,
            close: None,
            volume: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_close(mut self, close: f64) -> Self {
        self.close = Some(close);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_value(mut self, spec: IndicatorSpec, value: impl Into<IndicatorValue>) -> Self {
        self.insert(spec, value);
        self
    }

    pub fn insert(&mut self, spec: IndicatorSpec, value: impl Into<IndicatorValue>) {
        self.values.insert(spec.name(), value.into());
    }

    /// Entry for `spec`, or `None` if it was never requested.
    pub fn get(&self, spec: &IndicatorSpec) -> Option<IndicatorValue> {
        self.values.get(&spec.name()).copied()
    }

    /// Numeric value for `spec` if it was requested and is defined.
    pub fn value(&self, spec: &IndicatorSpec) -> Option<f64> {
        self.get(spec).and_then(IndicatorValue::value)
    }

    pub fn contains(&self, spec: &IndicatorSpec) -> bool {
        self.values.contains_key(&spec.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, IndicatorValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Full derived series for display: one column per requested indicator,
/// aligned index-for-index with `dates`.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorTable {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    columns: BTreeMap<String, Vec<IndicatorValue>>,
}

impl IndicatorTable {
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>, closes: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            dates,
            closes,
            columns: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, spec: IndicatorSpec, column: Vec<IndicatorValue>) {
        self.columns.insert(spec.name(), column);
    }

    pub fn column(&self, spec: &IndicatorSpec) -> Option<&[IndicatorValue]> {
        self.columns.get(&spec.name()).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[IndicatorValue])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
