//! Report aggregations over the enriched record set.
//!
//! All grouping goes through BTreeMaps and every sort carries a full
//! tie-break chain, so identical inputs always produce identical report
//! rows in identical order.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tally_core::Transaction;

/// Pairs seen in at least this many distinct months look recurring
const RECURRING_MIN_MONTHS: usize = 2;

/// Monthly outflow total for one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryMonthRow {
    pub month: String,
    pub category: String,
    pub spend_abs: f64,
}

/// Monthly outflow total for one merchant description
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MerchantMonthRow {
    pub month: String,
    pub description: String,
    pub spend_abs: f64,
}

/// A (merchant, amount) pair recurring across months
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecurringRow {
    pub description: String,
    pub amount_round: f64,
    pub months_seen: usize,
}

/// Outflow spend by (month, category), month ascending then spend
/// descending; category breaks exact spend ties.
pub fn monthly_by_category(records: &[Transaction]) -> Vec<CategoryMonthRow> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for rec in records.iter().filter(|r| r.is_outflow()) {
        *totals
            .entry((rec.month.clone(), rec.category.clone()))
            .or_insert(0.0) += rec.spend_abs;
    }

    let mut rows: Vec<CategoryMonthRow> = totals
        .into_iter()
        .map(|((month, category), spend_abs)| CategoryMonthRow {
            month,
            category,
            spend_abs,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| b.spend_abs.total_cmp(&a.spend_abs))
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// Outflow spend by (month, description), ordered like the category view.
pub fn monthly_by_merchant(records: &[Transaction]) -> Vec<MerchantMonthRow> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for rec in records.iter().filter(|r| r.is_outflow()) {
        *totals
            .entry((rec.month.clone(), rec.description.clone()))
            .or_insert(0.0) += rec.spend_abs;
    }

    let mut rows: Vec<MerchantMonthRow> = totals
        .into_iter()
        .map(|((month, description), spend_abs)| MerchantMonthRow {
            month,
            description,
            spend_abs,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| b.spend_abs.total_cmp(&a.spend_abs))
            .then_with(|| a.description.cmp(&b.description))
    });
    rows
}

/// Outflow (description, amount-to-the-cent) pairs seen in two or more
/// distinct months, ordered by months seen descending then description.
pub fn recurring_candidates(records: &[Transaction]) -> Vec<RecurringRow> {
    // Key on whole cents so 9.99 and 9.994 group together
    let mut months: BTreeMap<(String, i64), BTreeSet<&str>> = BTreeMap::new();
    for rec in records.iter().filter(|r| r.is_outflow()) {
        let cents = (rec.amount * 100.0).round() as i64;
        months
            .entry((rec.description.clone(), cents))
            .or_default()
            .insert(rec.month.as_str());
    }

    let mut rows: Vec<RecurringRow> = months
        .into_iter()
        .filter(|(_, seen)| seen.len() >= RECURRING_MIN_MONTHS)
        .map(|((description, cents), seen)| RecurringRow {
            description,
            amount_round: cents as f64 / 100.0,
            months_seen: seen.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.months_seen
            .cmp(&a.months_seen)
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.amount_round.total_cmp(&b.amount_round))
    });
    rows
}

/// Records carrying any review flag, in working (date-sorted) order.
pub fn review_subset(records: &[Transaction]) -> Vec<Transaction> {
    records
        .iter()
        .filter(|r| r.needs_review())
        .cloned()
        .collect()
}
