//! tally-core: record and rule-set types for the ledger cleaning pipeline

pub mod record;
pub mod rules;

pub use record::{RawRow, Transaction, month_key};
pub use rules::{CategoryRule, RuleSet, WeirdScorePoints};
