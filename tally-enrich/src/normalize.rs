//! Description normalization: trim, upper-case, and apply the merchant
//! substitutions in rule-file order.

use tally_core::RuleSet;

/// Produce canonical description text for downstream matching.
///
/// Substitutions are literal substring replacements (not regex), applied
/// sequentially — later rules see the output of earlier ones. Search and
/// replacement text are upper-cased so matching is case-insensitive
/// against the already upper-cased input. Total function: no match means
/// no change.
pub fn normalize_description(raw: &str, rules: &RuleSet) -> String {
    let mut text = raw.trim().to_uppercase();
    for (find, replace) in &rules.merchant_normalization {
        text = text.replace(&find.to_uppercase(), &replace.to_uppercase());
    }
    text
}
