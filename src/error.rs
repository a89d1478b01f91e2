use thiserror::Error;

/// Errors surfaced to callers. Insufficient history is not one of them: it is
/// represented as an undefined indicator value.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("market data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("invalid price series: {0}")]
    InvalidSeries(String),

    #[error("invalid snapshot for {symbol}: missing {missing}")]
    InvalidSnapshot { symbol: String, missing: String },

    #[error("no rule set configured for instrument {0}")]
    UnsupportedInstrument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub fn unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Whether the pipeline should skip the instrument and keep going.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, SignalError>;
