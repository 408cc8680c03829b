//! Parse a raw ledger CSV into typed rows.
//!
//! Expected shape (header names matched case-insensitively):
//!   Date,Description,Amount
//!   2026-01-03,SQ *BLUE BOTTLE,-4.75
//!
//! Rows whose date or amount fail to parse are dropped, not fatal;
//! a missing required column is fatal because nothing can be parsed.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::io;
use std::path::Path;
use tally_core::RawRow;

/// Parse result: surviving rows plus how many were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLedger {
    pub rows: Vec<RawRow>,
    pub dropped: usize,
}

/// Parse a ledger CSV file.
pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<ParsedLedger> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening input file {}", path.display()))?;
    parse_ledger_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse ledger CSV from any reader, returning all well-typed rows.
pub fn parse_ledger_reader<R: io::Read>(reader: R) -> Result<ParsedLedger> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("reading header row")?.clone();
    let date_col = find_column(&headers, "date")?;
    let desc_col = find_column(&headers, "description")?;
    let amount_col = find_column(&headers, "amount")?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;

        let parsed = (|| {
            let date = parse_date(record.get(date_col)?)?;
            // An empty description counts as missing, like a blank cell
            let description = match record.get(desc_col)? {
                "" => return None,
                d => d.to_string(),
            };
            let amount = parse_amount(record.get(amount_col)?)?;
            Some(RawRow { date, description, amount })
        })();

        match parsed {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    Ok(ParsedLedger { rows, dropped })
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    match headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
    {
        Some(i) => Ok(i),
        None => bail!("input is missing a '{}' column (found: {:?})", name, headers),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_amount(s: &str) -> Option<f64> {
    s.trim().replace(',', "").parse().ok()
}
