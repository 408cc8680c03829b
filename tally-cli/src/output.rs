//! Build the five report tables in memory, then write them as CSV.
//!
//! Building everything before the first write is what guarantees a
//! fatal error never leaves a partially written output directory.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tally_core::Transaction;
use tally_enrich::{
    CategoryMonthRow, MerchantMonthRow, RecurringRow, monthly_by_category, monthly_by_merchant,
    recurring_candidates, review_subset,
};

pub const CLEAN_FILE: &str = "clean_transactions.csv";
pub const MONTHLY_FILE: &str = "monthly_summary.csv";
pub const MERCHANTS_FILE: &str = "top_merchants.csv";
pub const RECURRING_FILE: &str = "subscription_candidates.csv";
pub const REVIEW_FILE: &str = "flagged_review.csv";

/// Output file names in the order they are written
pub const FILE_NAMES: [&str; 5] = [
    CLEAN_FILE,
    MONTHLY_FILE,
    MERCHANTS_FILE,
    RECURRING_FILE,
    REVIEW_FILE,
];

const RECORD_HEADERS: [&str; 11] = [
    "date",
    "description_raw",
    "description",
    "amount",
    "month",
    "category",
    "spend_abs",
    "is_duplicate",
    "is_near_duplicate",
    "weird_score",
    "is_weird",
];

/// All five derived tables for one run
pub struct ReportSet {
    pub enriched: Vec<Transaction>,
    pub monthly_category: Vec<CategoryMonthRow>,
    pub monthly_merchant: Vec<MerchantMonthRow>,
    pub recurring: Vec<RecurringRow>,
    pub review: Vec<Transaction>,
}

impl ReportSet {
    /// Derive every view from the enriched working set.
    pub fn build(enriched: Vec<Transaction>) -> ReportSet {
        ReportSet {
            monthly_category: monthly_by_category(&enriched),
            monthly_merchant: monthly_by_merchant(&enriched),
            recurring: recurring_candidates(&enriched),
            review: review_subset(&enriched),
            enriched,
        }
    }

    /// Write all five tables under `out_dir`, creating it if needed.
    pub fn write(&self, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;

        write_table(&out_dir.join(CLEAN_FILE), &RECORD_HEADERS, &self.enriched)?;
        write_table(
            &out_dir.join(MONTHLY_FILE),
            &["month", "category", "spend_abs"],
            &self.monthly_category,
        )?;
        write_table(
            &out_dir.join(MERCHANTS_FILE),
            &["month", "description", "spend_abs"],
            &self.monthly_merchant,
        )?;
        write_table(
            &out_dir.join(RECURRING_FILE),
            &["description", "amount_round", "months_seen"],
            &self.recurring,
        )?;
        write_table(&out_dir.join(REVIEW_FILE), &RECORD_HEADERS, &self.review)?;
        Ok(())
    }
}

/// Write one table: explicit header row, then one line per record.
/// The header is written by hand so empty tables still carry one.
fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
