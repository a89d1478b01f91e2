//! Bollinger Bands indicator

use serde::Serialize;

use crate::common::math;
use crate::models::Bar;

pub const DEFAULT_BOLLINGER_WINDOW: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub window: u32,
    pub sigma: f64,
}

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(window)
/// Upper Band = Middle + (sigma * sample standard deviation)
/// Lower Band = Middle - (sigma * sample standard deviation)
pub fn calculate_bollinger_bands(bars: &[Bar], window: u32, sigma: f64) -> Option<BollingerBands> {
    if bars.len() < window as usize {
        return None;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = math::sma(&closes, window as usize)?;
    let std = math::standard_deviation(&closes, window as usize)?;

    Some(BollingerBands {
        upper: middle + (sigma * std),
        middle,
        lower: middle - (sigma * std),
        window,
        sigma,
    })
}

/// Bands for every bar, `None` until `window` bars are available
pub fn calculate_bollinger_series(
    bars: &[Bar],
    window: u32,
    sigma: f64,
) -> Vec<Option<BollingerBands>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middles = math::rolling_sma(&closes, window as usize);
    let stds = math::rolling_standard_deviation(&closes, window as usize);

    middles
        .into_iter()
        .zip(stds)
        .map(|(middle, std)| {
            let (middle, std) = (middle?, std?);
            Some(BollingerBands {
                upper: middle + (sigma * std),
                middle,
                lower: middle - (sigma * std),
                window,
                sigma,
            })
        })
        .collect()
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(bars: &[Bar]) -> Option<BollingerBands> {
    calculate_bollinger_bands(bars, DEFAULT_BOLLINGER_WINDOW, 2.0)
}
