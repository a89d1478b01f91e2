//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::Bar;

/// Mean of the trailing `window` closes
pub fn calculate_sma(bars: &[Bar], window: u32) -> Option<f64> {
    if bars.len() < window as usize {
        return None;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::sma(&closes, window as usize)
}

/// SMA for every bar, `None` until `window` bars are available
pub fn calculate_sma_series(bars: &[Bar], window: u32) -> Vec<Option<f64>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::rolling_sma(&closes, window as usize)
}

/// Calculate multiple SMAs at once, keeping undefined windows as `None`
pub fn calculate_smas(bars: &[Bar], windows: &[u32]) -> Vec<(u32, Option<f64>)> {
    windows
        .iter()
        .map(|&window| (window, calculate_sma(bars, window)))
        .collect()
}

/// Percentage by which `close` sits below the SMA; negative when above
pub fn deviation_below_sma_pct(bars: &[Bar], window: u32) -> Option<f64> {
    let sma = calculate_sma(bars, window)?;
    if sma == 0.0 {
        return None;
    }
    let close = bars.last()?.close;
    Some((sma - close) / sma * 100.0)
}
