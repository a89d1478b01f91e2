//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binary. Every setting has a default except the rule-book path.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, SignalError};
use crate::models::RuleBook;

pub const DEFAULT_SYMBOLS: &str = "VYM,JEPQ,JEPI,TLT";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 400;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_FETCH_RETRIES: usize = 3;

/// Deployment environment name (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SignalError::Config(format!(
                "REPORT_FORMAT must be text or json, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
            retries: DEFAULT_FETCH_RETRIES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub symbols: Vec<String>,
    pub lookback_days: u32,
    pub provider: ProviderConfig,
    pub rulebook_path: Option<PathBuf>,
    pub report_format: ReportFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            symbols: parse_symbols(DEFAULT_SYMBOLS),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            provider: ProviderConfig::default(),
            rulebook_path: None,
            report_format: ReportFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let symbols = get("SIGNAL_SYMBOLS")
            .map(|s| parse_symbols(&s))
            .unwrap_or(defaults.symbols);
        if symbols.is_empty() {
            return Err(SignalError::Config("SIGNAL_SYMBOLS lists no symbols".to_string()));
        }

        let lookback_days = parse_number("LOOKBACK_DAYS", get("LOOKBACK_DAYS"))?
            .unwrap_or(defaults.lookback_days);
        if lookback_days == 0 {
            return Err(SignalError::Config("LOOKBACK_DAYS must be > 0".to_string()));
        }

        let timeout_secs: u64 = parse_number("HTTP_TIMEOUT_SECONDS", get("HTTP_TIMEOUT_SECONDS"))?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);
        let retries = parse_number("FETCH_RETRIES", get("FETCH_RETRIES"))?
            .unwrap_or(DEFAULT_FETCH_RETRIES);

        let report_format = match get("REPORT_FORMAT") {
            Some(v) => v.parse()?,
            None => defaults.report_format,
        };

        Ok(Self {
            environment: get("APP_ENV").unwrap_or(defaults.environment),
            symbols,
            lookback_days,
            provider: ProviderConfig {
                base_url: get("YAHOO_BASE_URL").unwrap_or(defaults.provider.base_url),
                timeout: Duration::from_secs(timeout_secs),
                retries,
            },
            rulebook_path: get("RULEBOOK_PATH").map(PathBuf::from),
            report_format,
        })
    }

    /// Rule book from `RULEBOOK_PATH`, or the built-in one.
    pub fn load_rule_book(&self) -> Result<RuleBook> {
        match &self.rulebook_path {
            Some(path) => RuleBook::load(path),
            None => Ok(RuleBook::builtin()),
        }
    }
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .map_err(|_| SignalError::Config(format!("{} is not a valid number: {}", key, v)))
    })
    .transpose()
}
