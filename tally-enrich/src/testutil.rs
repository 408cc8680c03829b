//! Shared fixtures for pipeline tests.

use chrono::NaiveDate;
use tally_core::{RawRow, RuleSet};

/// Rule set with custom merchant substitutions and category rules,
/// both given as JSON fragments.
pub fn rules_with(merchant_normalization: &str, category_rules: &str) -> RuleSet {
    RuleSet::from_json_str(&format!(
        r#"{{
            "merchant_normalization": {merchant_normalization},
            "category_rules": {category_rules},
            "duplicate_window_days": 3,
            "tiny_charge_threshold": 1.0,
            "large_charge_threshold": 500.0,
            "weird_score_threshold": 2,
            "weird_score_rules": {{
                "unknown_merchant_points": 2,
                "tiny_charge_points": 1,
                "rare_merchant_points": 1,
                "large_charge_points": 1
            }}
        }}"#
    ))
    .unwrap()
}

/// Default rule set used by most tests.
pub fn rules() -> RuleSet {
    rules_with(
        r#"{"SQ *": "", "AMZN MKTP": "AMAZON"}"#,
        r#"[
            {"category": "Coffee", "keywords": ["BLUE BOTTLE", "COFFEE"]},
            {"category": "Shopping", "keywords": ["AMAZON"]},
            {"category": "Subscriptions", "keywords": ["SPOTIFY", "NETFLIX"]}
        ]"#,
    )
}

pub fn row(date: &str, description: &str, amount: f64) -> RawRow {
    RawRow {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: description.to_string(),
        amount,
    }
}
