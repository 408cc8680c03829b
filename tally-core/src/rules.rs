//! Rule set loaded once per run: merchant rewrites, category keywords,
//! and anomaly thresholds. Rules are data, not code — the pipeline only
//! ever reads them.

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One category with its keyword list. List position is precedence:
/// earlier rules beat later ones regardless of keyword specificity.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Point values for the four weird-score signals
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct WeirdScorePoints {
    pub unknown_merchant_points: u32,
    pub tiny_charge_points: u32,
    pub rare_merchant_points: u32,
    pub large_charge_points: u32,
}

/// Externally supplied configuration for a whole run
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleSet {
    /// Literal merchant text → canonical replacement, applied in file order.
    /// Kept as pairs (not a map type) because application order is semantic.
    #[serde(deserialize_with = "ordered_pairs")]
    pub merchant_normalization: Vec<(String, String)>,
    pub category_rules: Vec<CategoryRule>,
    pub duplicate_window_days: i64,
    pub tiny_charge_threshold: f64,
    pub large_charge_threshold: f64,
    pub weird_score_threshold: u32,
    pub weird_score_rules: WeirdScorePoints,
}

impl RuleSet {
    /// Parse a rules document from JSON text.
    pub fn from_json_str(s: &str) -> Result<RuleSet> {
        serde_json::from_str(s).context("parsing rules JSON")
    }

    /// Non-fatal sanity checks. Returns human-readable warnings; an empty
    /// vec means the rules look consistent.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.duplicate_window_days < 0 {
            warnings.push(format!(
                "duplicate_window_days is negative ({}); no near-duplicates will match",
                self.duplicate_window_days
            ));
        }

        if self.tiny_charge_threshold > self.large_charge_threshold {
            warnings.push(format!(
                "tiny_charge_threshold ({}) exceeds large_charge_threshold ({})",
                self.tiny_charge_threshold, self.large_charge_threshold
            ));
        }

        for rule in &self.category_rules {
            if rule.keywords.is_empty() {
                warnings.push(format!(
                    "category '{}' has no keywords and can never match",
                    rule.category
                ));
            }
        }

        warnings
    }

    /// Category labels in precedence order.
    pub fn category_names(&self) -> Vec<&str> {
        self.category_rules
            .iter()
            .map(|r| r.category.as_str())
            .collect()
    }
}

/// Deserialize a JSON object into pairs, preserving document order.
/// serde_json's default map type sorts keys, which would silently
/// reorder the substitution sequence.
fn ordered_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairVisitor;

    impl<'de> Visitor<'de> for PairVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of merchant text to replacement text")
        }

        fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, String>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairVisitor)
}
