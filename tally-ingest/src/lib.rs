//! tally-ingest: file collaborators around the pipeline — CSV ledger
//! parsing and rules loading. No decision logic lives here.

pub mod ledger;
pub mod rules_file;

pub use ledger::{ParsedLedger, parse_ledger_csv, parse_ledger_reader};
pub use rules_file::load_rules;
