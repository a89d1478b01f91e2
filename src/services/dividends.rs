//! Trailing dividend yield.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    pub date: NaiveDate,
    pub amount: f64,
}

impl Dividend {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Sum of dividends paid in the year ending `as_of`, as a percentage of `price`.
///
/// `None` when nothing was paid in that window or the price is not positive.
pub fn trailing_dividend_yield(dividends: &[Dividend], price: f64, as_of: NaiveDate) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let cutoff = as_of.checked_sub_months(Months::new(12))?;

    let recent: Vec<f64> = dividends
        .iter()
        .filter(|d| d.date >= cutoff && d.date <= as_of && d.amount.is_finite())
        .map(|d| d.amount)
        .collect();

    if recent.is_empty() {
        return None;
    }

    Some(recent.iter().sum::<f64>() / price * 100.0)
}
