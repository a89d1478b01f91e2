//! Market data provider interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PriceSeries;

/// Boundary to the external market-data source. Timeouts and retries live
/// behind this trait; callers only see a series or `DataUnavailable`.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars covering roughly the last `lookback_days` calendar days.
    async fn daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries>;

    /// Trailing 12-month dividend yield in percent, if the symbol paid any.
    async fn trailing_dividend_yield(&self, symbol: &str) -> Result<Option<f64>>;

    /// Latest close for a quote-only symbol such as a yield or volatility index.
    async fn latest_close(&self, symbol: &str) -> Result<Option<f64>> {
        let series = self.daily_bars(symbol, 10).await?;
        Ok(Some(series.latest().close))
    }
}
