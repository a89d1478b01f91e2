//! Instrument-independent market inputs.

use serde::{Deserialize, Serialize};

/// Each field is independently optional; rules that read an absent field do not trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroContext {
    /// 10-year treasury yield, percent.
    pub risk_free_rate: Option<f64>,
    /// Broad-market trailing dividend yield, percent.
    pub market_dividend_yield: Option<f64>,
    pub volatility_index: Option<f64>,
}

impl MacroContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    pub fn with_market_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.market_dividend_yield = Some(dividend_yield);
        self
    }

    pub fn with_volatility_index(mut self, vix: f64) -> Self {
        self.volatility_index = Some(vix);
        self
    }

    pub fn get(&self, field: MacroField) -> Option<f64> {
        let value = match field {
            MacroField::RiskFreeRate => self.risk_free_rate,
            MacroField::MarketDividendYield => self.market_dividend_yield,
            MacroField::VolatilityIndex => self.volatility_index,
        };
        value.filter(|v| v.is_finite())
    }

    /// Market dividend yield minus the risk-free rate, when both are known.
    pub fn yield_spread(&self) -> Option<f64> {
        Some(self.get(MacroField::MarketDividendYield)? - self.get(MacroField::RiskFreeRate)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MacroField {
    RiskFreeRate,
    MarketDividendYield,
    VolatilityIndex,
}
