//! Macro context assembly from provider lookups.

use tracing::{info, warn};

use crate::error::Result;
use crate::models::MacroContext;
use crate::services::market_data::MarketDataProvider;

/// 10-year treasury yield index, quoted in percent.
pub const RISK_FREE_RATE_SYMBOL: &str = "^TNX";
pub const VOLATILITY_INDEX_SYMBOL: &str = "^VIX";
/// Broad-market fund whose trailing dividend yield stands in for the market's.
pub const MARKET_YIELD_SYMBOL: &str = "SPY";

/// Fetch each macro input independently. A failed lookup leaves that field
/// absent instead of failing the run.
pub async fn fetch_macro_context(provider: &dyn MarketDataProvider) -> MacroContext {
    let context = MacroContext {
        risk_free_rate: absorb(
            "risk_free_rate",
            provider.latest_close(RISK_FREE_RATE_SYMBOL).await,
        ),
        market_dividend_yield: absorb(
            "market_dividend_yield",
            provider.trailing_dividend_yield(MARKET_YIELD_SYMBOL).await,
        ),
        volatility_index: absorb(
            "volatility_index",
            provider.latest_close(VOLATILITY_INDEX_SYMBOL).await,
        ),
    };

    info!(
        risk_free_rate = ?context.risk_free_rate,
        market_dividend_yield = ?context.market_dividend_yield,
        volatility_index = ?context.volatility_index,
        "macro context"
    );
    context
}

fn absorb(field: &str, result: Result<Option<f64>>) -> Option<f64> {
    match result {
        Ok(value) => value.filter(|v| v.is_finite()),
        Err(e) => {
            warn!(field = field, error = %e, "macro input unavailable");
            None
        }
    }
}
