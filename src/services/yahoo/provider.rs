//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{Duration as ChronoDuration, Utc};
use tracing::{debug, warn};
use url::Url;

use super::messages::{ChartResponse, ChartResult};
use crate::config::ProviderConfig;
use crate::error::{Result, SignalError};
use crate::models::PriceSeries;
use crate::services::dividends::trailing_dividend_yield;
use crate::services::market_data::MarketDataProvider;

const USER_AGENT: &str = concat!("etf-signals/", env!("CARGO_PKG_VERSION"));

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: Url,
    retries: usize,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SignalError::Config(format!("invalid provider url {}: {}", config.base_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            retries: config.retries,
        })
    }

    fn chart_url(&self, symbol: &str, lookback_days: u32) -> Result<Url> {
        let end = Utc::now();
        let start = end - ChronoDuration::days(i64::from(lookback_days));

        let mut url = self
            .base_url
            .join(&format!("v8/finance/chart/{}", symbol))
            .map_err(|e| SignalError::Config(format!("invalid chart url for {}: {}", symbol, e)))?;
        url.query_pairs_mut()
            .append_pair("period1", &start.timestamp().to_string())
            .append_pair("period2", &end.timestamp().to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "div");
        Ok(url)
    }

    async fn request(&self, symbol: &str, url: &Url) -> Result<ChartResponse> {
        let response = self.client.get(url.clone()).send().await?;
        // 5xx is retried; anything else is parsed for a chart-level error
        let response = if response.status().is_server_error() {
            response.error_for_status()?
        } else {
            response
        };

        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            SignalError::unavailable(
                symbol,
                format!("unparseable chart payload (status {}): {}", status, e),
            )
        })
    }

    async fn fetch_chart(&self, symbol: &str, lookback_days: u32) -> Result<ChartResult> {
        let url = self.chart_url(symbol, lookback_days)?;
        debug!(symbol = %symbol, url = %url, "fetching chart");

        let response = (|| async { self.request(symbol, &url).await })
            .retry(ExponentialBuilder::default().with_max_times(self.retries))
            .when(|e: &SignalError| matches!(e, SignalError::Http(_)))
            .notify(|e: &SignalError, delay: std::time::Duration| {
                warn!(symbol = %symbol, error = %e, ?delay, "chart request failed, retrying");
            })
            .await
            .map_err(|e| match e {
                SignalError::Http(err) => SignalError::unavailable(symbol, err.to_string()),
                other => other,
            })?;

        if let Some(error) = response.chart.error {
            return Err(SignalError::unavailable(
                symbol,
                format!("{}: {}", error.code, error.description),
            ));
        }

        response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SignalError::unavailable(symbol, "empty chart result"))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries> {
        let chart = self.fetch_chart(symbol, lookback_days).await?;
        let bars = chart.bars();
        debug!(symbol = %symbol, bars = bars.len(), "received daily bars");
        PriceSeries::new(symbol, bars)
    }

    async fn trailing_dividend_yield(&self, symbol: &str) -> Result<Option<f64>> {
        let chart = self.fetch_chart(symbol, 366).await?;
        let Some(latest) = chart.bars().last().copied() else {
            return Err(SignalError::unavailable(symbol, "no closing price"));
        };
        let dividends = chart.dividends();
        Ok(trailing_dividend_yield(
            &dividends,
            latest.close,
            Utc::now().date_naive(),
        ))
    }
}
