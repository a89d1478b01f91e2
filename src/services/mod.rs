//! External collaborators: market data, dividends and macro inputs.

pub mod dividends;
pub mod macro_data;
pub mod market_data;
pub mod yahoo;

pub use market_data::MarketDataProvider;
pub use yahoo::YahooProvider;
