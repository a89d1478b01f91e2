//! ETF buy-timing signals.
//!
//! Daily bars flow one way: [`models::PriceSeries`] → [`indicators::IndicatorEngine`]
//! → [`models::IndicatorSnapshot`] → [`signals::SignalClassifier`] → [`models::SignalLabel`].

pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;

pub use error::{Result, SignalError};
