//! Chart-API payloads.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::Bar;
use crate::services::dividends::Dividend;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
    #[serde(default)]
    pub events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartEvents {
    #[serde(default)]
    pub dividends: HashMap<String, DividendEvent>,
}

#[derive(Debug, Deserialize)]
pub struct DividendEvent {
    pub amount: f64,
    pub date: i64,
}

impl ChartResult {
    /// Daily bars in ascending date order. Rows without a close are dropped,
    /// a missing volume counts as zero, and a repeated date keeps the later row.
    pub fn bars(&self) -> Vec<Bar> {
        let Some(quote) = self.indicators.quote.first() else {
            return Vec::new();
        };

        let mut by_date: BTreeMap<NaiveDate, Bar> = BTreeMap::new();
        for (i, ts) in self.timestamp.iter().enumerate() {
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };
            let Some(date) = to_date(*ts) else {
                continue;
            };
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);
            by_date.insert(date, Bar::new(date, close, volume));
        }

        by_date.into_values().collect()
    }

    pub fn dividends(&self) -> Vec<Dividend> {
        let Some(events) = &self.events else {
            return Vec::new();
        };

        let mut dividends: Vec<Dividend> = events
            .dividends
            .values()
            .filter_map(|event| Some(Dividend::new(to_date(event.date)?, event.amount)))
            .collect();
        dividends.sort_by_key(|d| d.date);
        dividends
    }
}

fn to_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}
