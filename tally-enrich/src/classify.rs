//! Keyword classifier: map a normalized description to exactly one
//! category, first match wins.

use tally_core::RuleSet;

/// Category returned when no rule matches
pub const OTHER_CATEGORY: &str = "Other";

/// Deterministically categorize a description.
///
/// Rules are tried in file order, keywords in list order; the first
/// case-insensitive substring hit wins outright — a later rule never
/// overrides an earlier one, however specific its keyword.
pub fn categorize(description: &str, rules: &RuleSet) -> String {
    let desc = description.to_uppercase();
    for rule in &rules.category_rules {
        for keyword in &rule.keywords {
            if desc.contains(&keyword.to_uppercase()) {
                return rule.category.clone();
            }
        }
    }
    OTHER_CATEGORY.to_string()
}
