//! The enrichment pipeline: raw rows in, classified and flagged
//! records out. Data flows strictly forward through the stages.

use tally_core::{RawRow, RuleSet, Transaction, month_key};

use crate::anomaly;
use crate::classify::categorize;
use crate::normalize::normalize_description;

/// Run the full enrichment pass over parsed rows.
///
/// Per row: normalize the description, derive month/category/spend_abs.
/// The set is then stably sorted ascending by date (ties keep input
/// order) and the anomaly signals are computed over that order. The
/// returned order is the working order every report sees.
pub fn enrich(rows: &[RawRow], rules: &RuleSet) -> Vec<Transaction> {
    let mut records: Vec<Transaction> = rows
        .iter()
        .map(|row| {
            let description = normalize_description(&row.description, rules);
            let category = categorize(&description, rules);
            Transaction {
                date: row.date,
                description_raw: row.description.clone(),
                description,
                amount: row.amount,
                month: month_key(row.date),
                category,
                spend_abs: row.amount.abs(),
                is_duplicate: false,
                is_near_duplicate: false,
                weird_score: 0,
                is_weird: false,
            }
        })
        .collect();

    records.sort_by(|a, b| a.date.cmp(&b.date));
    anomaly::detect(&mut records, rules);
    records
}
