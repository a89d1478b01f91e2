//! Unit tests for volume average

use chrono::Duration;
use etf_signals::indicators::volume::{
    calculate_volume_average, calculate_volume_average_series, is_volume_surge,
};
use etf_signals::models::Bar;

use crate::support::start_date;

fn bars_with_volumes(volumes: &[f64]) -> Vec<Bar> {
    volumes
        .iter()
        .enumerate()
        .map(|(i, &v)| Bar::new(start_date() + Duration::days(i as i64), 50.0, v))
        .collect()
}

#[test]
fn test_volume_average() {
    let bars = bars_with_volumes(&[100.0, 200.0, 300.0]);
    assert_eq!(calculate_volume_average(&bars, 3), Some(200.0));
    assert!(calculate_volume_average(&bars, 4).is_none());
}

#[test]
fn test_volume_surge() {
    let mut volumes = vec![1_000.0; 19];
    volumes.push(3_000.0);
    let bars = bars_with_volumes(&volumes);
    // average 1100, 3000 > 1430
    assert_eq!(is_volume_surge(&bars, 20, 1.3), Some(true));

    let bars = bars_with_volumes(&[1_000.0; 20]);
    assert_eq!(is_volume_surge(&bars, 20, 1.3), Some(false));
    assert_eq!(is_volume_surge(&bars[..5], 20, 1.3), None);
}

#[test]
fn test_volume_average_series() {
    let bars = bars_with_volumes(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        calculate_volume_average_series(&bars, 2),
        vec![None, Some(1.5), Some(2.5), Some(3.5)]
    );
}
