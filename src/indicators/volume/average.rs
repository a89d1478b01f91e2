//! Trailing volume average and surge detection

use crate::common::math;
use crate::models::Bar;

/// Mean of the trailing `window` volumes
pub fn calculate_volume_average(bars: &[Bar], window: u32) -> Option<f64> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    math::sma(&volumes, window as usize)
}

/// Volume average for every bar, `None` until `window` bars are available
pub fn calculate_volume_average_series(bars: &[Bar], window: u32) -> Vec<Option<f64>> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    math::rolling_sma(&volumes, window as usize)
}

/// Whether the latest volume exceeds its trailing average by `multiplier`
pub fn is_volume_surge(bars: &[Bar], window: u32, multiplier: f64) -> Option<bool> {
    let average = calculate_volume_average(bars, window)?;
    let latest = bars.last()?.volume;
    Some(latest > average * multiplier)
}
