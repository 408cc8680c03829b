//! Enriched transaction record produced by the pipeline

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One well-typed input row, before any enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

/// One ledger line after normalization, classification, and flagging.
///
/// Field order is the column order of the enriched CSV export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Description exactly as it appeared in the input
    pub description_raw: String,
    /// Trimmed, upper-cased description after merchant substitutions
    pub description: String,
    /// Positive = inflow, negative = outflow
    pub amount: f64,
    /// Year-month label derived from `date` (YYYY-MM)
    pub month: String,
    /// Category from the first matching rule, or "Other"
    pub category: String,
    /// Absolute value of `amount`
    pub spend_abs: f64,
    /// An earlier record has the same (date, description, amount)
    pub is_duplicate: bool,
    /// The immediately preceding record is a close match
    pub is_near_duplicate: bool,
    /// Additive anomaly score from the weird-score rules
    pub weird_score: u32,
    /// `weird_score` reached the configured threshold
    pub is_weird: bool,
}

impl Transaction {
    /// Returns true if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if any review flag is set
    pub fn needs_review(&self) -> bool {
        self.is_duplicate || self.is_near_duplicate || self.is_weird
    }
}

/// Year-month label for a date, e.g. 2026-03-05 → "2026-03".
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
