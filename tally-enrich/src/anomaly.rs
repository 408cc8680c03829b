//! Anomaly signals over the date-sorted record set: exact duplicates,
//! near duplicates, and the additive weird score.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tally_core::{RuleSet, Transaction};

/// Amounts closer than this are treated as equal for near-duplicates
const NEAR_AMOUNT_EPSILON: f64 = 0.01;

/// Compute all three anomaly signals. `records` must already be sorted
/// ascending by date; flags are written in place.
pub fn detect(records: &mut [Transaction], rules: &RuleSet) {
    flag_exact_duplicates(records);
    flag_near_duplicates(records, rules.duplicate_window_days);
    score_weirdness(records, rules);
}

/// Mark every record whose (date, description, amount) triple was already
/// seen earlier in sort order. Membership is over the full history, not
/// just adjacent rows; only the first occurrence stays clean.
pub fn flag_exact_duplicates(records: &mut [Transaction]) {
    let mut seen: HashSet<(NaiveDate, String, u64)> = HashSet::new();
    for rec in records.iter_mut() {
        let key = (rec.date, rec.description.clone(), rec.amount.to_bits());
        rec.is_duplicate = !seen.insert(key);
    }
}

/// Mark records that closely repeat their IMMEDIATE predecessor: same
/// description, amounts within a cent, dates at most `window_days` apart.
///
/// This is deliberately a one-step backward scan over the date-sorted
/// sequence. A repeat separated by one unrelated transaction is not
/// detected; downstream consumers depend on that exact behavior, so any
/// widening of the comparison window is a breaking change.
pub fn flag_near_duplicates(records: &mut [Transaction], window_days: i64) {
    for i in 1..records.len() {
        let prev = &records[i - 1];
        let curr = &records[i];
        if prev.description == curr.description
            && (prev.amount - curr.amount).abs() < NEAR_AMOUNT_EPSILON
            && (curr.date - prev.date).num_days() <= window_days
        {
            records[i].is_near_duplicate = true;
        }
    }
}

/// Additive weird score: four independent signals, any subset may fire.
/// Description frequencies are counted once for the whole batch before
/// the per-record pass.
pub fn score_weirdness(records: &mut [Transaction], rules: &RuleSet) {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for rec in records.iter() {
        *freq.entry(rec.description.clone()).or_insert(0) += 1;
    }

    let pts = &rules.weird_score_rules;
    for rec in records.iter_mut() {
        let mut score = 0u32;
        // Case-sensitive on purpose: normalization already upper-cased
        if rec.description.contains("UNKNOWN") {
            score += pts.unknown_merchant_points;
        }
        if rec.spend_abs <= rules.tiny_charge_threshold {
            score += pts.tiny_charge_points;
        }
        if freq.get(&rec.description) == Some(&1) {
            score += pts.rare_merchant_points;
        }
        if rec.spend_abs >= rules.large_charge_threshold {
            score += pts.large_charge_points;
        }
        rec.weird_score = score;
        rec.is_weird = score >= rules.weird_score_threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::rules;
    use tally_core::month_key;

    fn txn(date: &str, description: &str, amount: f64) -> Transaction {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Transaction {
            date,
            description_raw: description.to_string(),
            description: description.to_string(),
            amount,
            month: month_key(date),
            category: "Other".to_string(),
            spend_abs: amount.abs(),
            is_duplicate: false,
            is_near_duplicate: false,
            weird_score: 0,
            is_weird: false,
        }
    }

    #[test]
    fn test_exact_duplicate_keeps_first_occurrence_clean() {
        let mut recs = vec![
            txn("2026-01-03", "SPOTIFY", -9.99),
            txn("2026-01-03", "SPOTIFY", -9.99),
            txn("2026-01-03", "SPOTIFY", -9.99),
        ];
        flag_exact_duplicates(&mut recs);
        assert_eq!(
            recs.iter().map(|r| r.is_duplicate).collect::<Vec<_>>(),
            vec![false, true, true]
        );
    }

    #[test]
    fn test_exact_duplicate_checks_full_history_not_adjacency() {
        let mut recs = vec![
            txn("2026-01-03", "SPOTIFY", -9.99),
            txn("2026-01-04", "COFFEE", -4.00),
            txn("2026-01-03", "SPOTIFY", -9.99),
        ];
        // Same triple separated by an unrelated row still flags
        flag_exact_duplicates(&mut recs);
        assert!(recs[2].is_duplicate);
    }

    #[test]
    fn test_exact_duplicate_requires_all_three_fields() {
        let mut recs = vec![
            txn("2026-01-03", "SPOTIFY", -9.99),
            txn("2026-01-03", "SPOTIFY", -9.98),
            txn("2026-01-04", "SPOTIFY", -9.99),
        ];
        flag_exact_duplicates(&mut recs);
        assert!(recs.iter().all(|r| !r.is_duplicate));
    }

    #[test]
    fn test_near_duplicate_within_window() {
        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-05", "GYM", -35.00),
        ];
        flag_near_duplicates(&mut recs, 3);
        assert!(!recs[0].is_near_duplicate);
        assert!(recs[1].is_near_duplicate);
    }

    #[test]
    fn test_near_duplicate_window_is_inclusive() {
        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-06", "GYM", -35.00),
        ];
        flag_near_duplicates(&mut recs, 3);
        assert!(recs[1].is_near_duplicate);

        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-07", "GYM", -35.00),
        ];
        flag_near_duplicates(&mut recs, 3);
        assert!(!recs[1].is_near_duplicate);
    }

    #[test]
    fn test_near_duplicate_same_day_counts_as_zero_days() {
        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-03", "GYM", -35.005),
        ];
        flag_near_duplicates(&mut recs, 0);
        assert!(recs[1].is_near_duplicate);
    }

    #[test]
    fn test_near_duplicate_blind_to_non_adjacent_repeats() {
        // A (day 1, X), B (day 2, Y), C (day 3, X): C is only compared to
        // B, so the A/C repeat goes unflagged. Required behavior.
        let mut recs = vec![
            txn("2026-01-01", "X", -10.00),
            txn("2026-01-02", "Y", -5.00),
            txn("2026-01-03", "X", -10.00),
        ];
        flag_near_duplicates(&mut recs, 5);
        assert!(recs.iter().all(|r| !r.is_near_duplicate));
    }

    #[test]
    fn test_near_duplicate_needs_close_amounts() {
        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-04", "GYM", -35.02),
        ];
        flag_near_duplicates(&mut recs, 3);
        assert!(!recs[1].is_near_duplicate, "two cents apart is not near");
    }

    #[test]
    fn test_near_duplicate_one_cent_gap_lands_under_epsilon() {
        // In f64, -35.00 - -35.01 computes to just under 0.01, so a
        // nominal one-cent gap still counts as near. Load-bearing float
        // behavior; keep the comparison strict-less-than.
        let mut recs = vec![
            txn("2026-01-03", "GYM", -35.00),
            txn("2026-01-04", "GYM", -35.01),
        ];
        flag_near_duplicates(&mut recs, 3);
        assert!(recs[1].is_near_duplicate);
    }

    #[test]
    fn test_weird_score_adds_independent_signals() {
        // Tiny (== threshold), globally unique, contains UNKNOWN:
        // 1 + 1 + 2 = 4 with the fixture points
        let mut recs = vec![
            txn("2026-01-03", "UNKNOWN MERCHANT 77", -1.00),
            txn("2026-01-04", "SPOTIFY", -9.99),
            txn("2026-02-04", "SPOTIFY", -9.99),
        ];
        score_weirdness(&mut recs, &rules());
        assert_eq!(recs[0].weird_score, 4);
        assert!(recs[0].is_weird);
        // Repeated merchant, mid-range amount: nothing fires
        assert_eq!(recs[1].weird_score, 0);
        assert!(!recs[1].is_weird);
    }

    #[test]
    fn test_weird_thresholds_are_inclusive() {
        let r = rules(); // tiny = 1.0, large = 500.0, threshold = 2
        let mut recs = vec![
            txn("2026-01-03", "SODA", -1.00),
            txn("2026-01-04", "SODA", -1.00),
            txn("2026-01-05", "RENT LLC", -500.00),
            txn("2026-01-06", "RENT LLC", -500.00),
        ];
        score_weirdness(&mut recs, &r);
        assert_eq!(recs[0].weird_score, 1, "tiny threshold is <=");
        assert_eq!(recs[2].weird_score, 1, "large threshold is >=");
        assert!(recs.iter().all(|t| !t.is_weird), "score 1 < threshold 2");
    }

    #[test]
    fn test_unknown_match_is_case_sensitive() {
        let mut recs = vec![
            txn("2026-01-03", "unknown merchant", -20.00),
            txn("2026-01-04", "unknown merchant", -21.00),
        ];
        score_weirdness(&mut recs, &rules());
        // Lower-case "unknown" does not trigger the signal
        assert_eq!(recs[0].weird_score, 0);
    }
}
