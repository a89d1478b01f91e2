use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorSnapshot;
use crate::models::macro_context::MacroContext;

/// Closed set of classifier outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SignalLabel {
    Bargain,
    ModeratePullback,
    MildPullback,
    BuyOpportunity,
    Watch,
}

impl SignalLabel {
    /// Higher is stronger conviction; `Watch` is 0.
    pub fn conviction(self) -> u8 {
        match self {
            Self::Bargain => 4,
            Self::ModeratePullback => 3,
            Self::MildPullback => 2,
            Self::BuyOpportunity => 1,
            Self::Watch => 0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Bargain => "Bargain level",
            Self::ModeratePullback => "Moderate pullback",
            Self::MildPullback => "Mild pullback",
            Self::BuyOpportunity => "Buy opportunity",
            Self::Watch => "Watch",
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Label plus the id of the rule that produced it (`None` for the default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SignalLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl Classification {
    pub fn matched(label: SignalLabel, rule_id: impl Into<String>) -> Self {
        Self {
            label,
            rule_id: Some(rule_id.into()),
        }
    }

    pub fn default_watch() -> Self {
        Self {
            label: SignalLabel::Watch,
            rule_id: None,
        }
    }
}

/// Per-instrument tuple handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentReport {
    pub symbol: String,
    pub date: NaiveDate,
    pub latest_price: f64,
    pub bars: usize,
    pub indicators: IndicatorSnapshot,
    pub classification: Classification,
    #[serde(rename = "macro")]
    pub macro_context: MacroContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl InstrumentReport {
    pub fn label(&self) -> SignalLabel {
        self.classification.label
    }
}
