//! Rules file loading. Any failure here is fatal to the run.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tally_core::RuleSet;

/// Read and parse a rules JSON file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    RuleSet::from_json_str(&text)
        .with_context(|| format!("in rules file {}", path.display()))
}
