//! Unit tests for rule books

use etf_signals::models::{IndicatorSpec, Operand, Rule, RuleBook, RuleSet, SignalLabel};
use etf_signals::SignalError;

const CUSTOM_BOOK: &str = r#"{
    "qqq": {
        "momentum": { "kind": "Rsi", "period": 14 },
        "rules": [
            {
                "id": "deep_dip",
                "label": "BuyOpportunity",
                "when": {
                    "All": [
                        { "Compare": { "left": "Close", "comparison": "LessEqual",
                                       "right": { "Indicator": { "kind": "Sma", "window": 100 } } } },
                        { "Compare": { "left": { "Macro": "VolatilityIndex" }, "comparison": "GreaterThan",
                                       "right": { "Constant": 25.0 } } }
                    ]
                }
            }
        ]
    }
}"#;

#[test]
fn test_builtin_book_covers_supported_funds() {
    let book = RuleBook::builtin();
    let symbols: Vec<&str> = book.symbols().collect();
    assert_eq!(symbols, vec!["JEPI", "JEPQ", "TLT", "VYM"]);
    assert!(book.validate().is_ok());
}

#[test]
fn test_lookup_is_case_insensitive() {
    let book = RuleBook::builtin();
    assert!(book.get("vym").is_some());
    assert!(book.get("SPY").is_none());
}

#[test]
fn test_builtin_required_specs() {
    let specs = RuleBook::builtin().required_specs();
    for expected in [
        IndicatorSpec::rsi(14),
        IndicatorSpec::sma(25),
        IndicatorSpec::sma(75),
        IndicatorSpec::bollinger_lower(20, 1.0),
        IndicatorSpec::bollinger_lower(20, 1.5),
        IndicatorSpec::bollinger_lower(20, 2.0),
        IndicatorSpec::volume_average(20),
    ] {
        assert!(specs.contains(&expected), "missing {}", expected.name());
    }
    // no duplicates across instruments
    assert_eq!(specs.len(), 7);
}

#[test]
fn test_load_custom_book_from_json() {
    let book = RuleBook::from_json_str(CUSTOM_BOOK).unwrap();
    let rule_set = book.get("QQQ").expect("re-keyed upper-case");
    assert_eq!(rule_set.rules.len(), 1);
    assert_eq!(rule_set.rules[0].label, SignalLabel::BuyOpportunity);
    assert!(rule_set.required_specs().contains(&IndicatorSpec::sma(100)));
}

#[test]
fn test_invalid_window_rejected_on_load() {
    let json = CUSTOM_BOOK.replace("\"window\": 100", "\"window\": 0");
    let err = RuleBook::from_json_str(&json).unwrap_err();
    assert!(matches!(err, SignalError::Config(_)));
}

#[test]
fn test_bollinger_window_of_one_rejected() {
    let rule_set = RuleSet::new(
        IndicatorSpec::rsi(14),
        vec![Rule::new(
            "band",
            SignalLabel::MildPullback,
            Operand::Close.le(Operand::indicator(IndicatorSpec::bollinger_lower(1, 2.0))),
        )],
    );
    assert!(rule_set.validate().is_err());
}

#[test]
fn test_serialized_book_loads_back() {
    let json = serde_json::to_string(&RuleBook::builtin()).unwrap();
    let loaded = RuleBook::from_json_str(&json).unwrap();
    assert_eq!(loaded, RuleBook::builtin());
}

#[test]
fn test_indicator_names() {
    assert_eq!(IndicatorSpec::rsi(14).name(), "RSI14");
    assert_eq!(IndicatorSpec::sma(50).name(), "MA50");
    assert_eq!(IndicatorSpec::bollinger_lower(20, 2.0).name(), "BB20_lower_2sigma");
    assert_eq!(IndicatorSpec::bollinger_upper(20, 1.5).name(), "BB20_upper_1_5sigma");
    assert_eq!(IndicatorSpec::volume_average(20).name(), "VOL_MA20");
}
