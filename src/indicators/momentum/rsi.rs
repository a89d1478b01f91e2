//! RSI (Relative Strength Index) indicator

use crate::models::Bar;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI over the trailing `period` close-to-close deltas
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss (simple averages)
///
/// Needs `period + 1` bars. When the average loss is zero, including a flat
/// window, RSI is 100.
pub fn calculate_rsi(bars: &[Bar], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || bars.len() < period + 1 {
        return None;
    }

    let window = &bars[bars.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for pair in window.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += change.abs();
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    Some(rsi_from_averages(avg_gain, avg_loss))
}

/// RSI for every bar, `None` until `period + 1` bars are available
pub fn calculate_rsi_series(bars: &[Bar], period: u32) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|end| calculate_rsi(&bars[..=end], period))
        .collect()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(bars: &[Bar]) -> Option<f64> {
    calculate_rsi(bars, DEFAULT_RSI_PERIOD)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.clamp(0.0, 100.0)
}
