//! Trailing-window statistics over plain `f64` slices.
//!
//! Every function looks at the last `period` values only and returns `None`
//! when fewer than `period` values exist.

/// Arithmetic mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    let window = trailing(values, period)?;
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Sample standard deviation (n - 1 divisor) of the trailing `period` values.
///
/// Needs at least two values in the window.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 {
        return None;
    }
    let window = trailing(values, period)?;
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (period - 1) as f64;
    Some(variance.sqrt())
}

/// Rolling version of [`sma`], aligned with `values`: slot `i` holds the mean
/// of the window ending at `i`, or `None` while the window is incomplete.
pub fn rolling_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|end| sma(&values[..=end], period))
        .collect()
}

/// Rolling version of [`standard_deviation`], aligned with `values`.
pub fn rolling_standard_deviation(values: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|end| standard_deviation(&values[..=end], period))
        .collect()
}

fn trailing(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}
