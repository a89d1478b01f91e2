//! Unit tests for trailing dividend yield

use chrono::NaiveDate;
use etf_signals::services::dividends::{trailing_dividend_yield, Dividend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sums_last_twelve_months() {
    let dividends = vec![
        Dividend::new(date(2023, 3, 20), 5.0),
        Dividend::new(date(2023, 12, 20), 1.0),
        Dividend::new(date(2024, 3, 20), 1.0),
        Dividend::new(date(2024, 6, 20), 1.0),
        Dividend::new(date(2024, 9, 20), 1.0),
    ];
    let value = trailing_dividend_yield(&dividends, 100.0, date(2024, 10, 1)).unwrap();
    assert!((value - 4.0).abs() < 1e-9);
}

#[test]
fn test_no_recent_dividends() {
    let dividends = vec![Dividend::new(date(2020, 1, 1), 2.0)];
    assert!(trailing_dividend_yield(&dividends, 100.0, date(2024, 10, 1)).is_none());
    assert!(trailing_dividend_yield(&[], 100.0, date(2024, 10, 1)).is_none());
}

#[test]
fn test_non_positive_price() {
    let dividends = vec![Dividend::new(date(2024, 9, 1), 2.0)];
    assert!(trailing_dividend_yield(&dividends, 0.0, date(2024, 10, 1)).is_none());
}
