use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_enrich::enrich;
use tally_ingest::{load_rules, parse_ledger_csv};

mod output;

use output::ReportSet;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Config-driven transaction ledger cleaner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean a ledger and write the five report tables
    Run {
        /// Input transactions CSV with Date, Description, Amount columns
        #[arg(long, default_value = "transactions_raw.csv")]
        input: PathBuf,

        /// Rules JSON (substitutions, categories, anomaly thresholds)
        #[arg(long, default_value = "rules.json")]
        rules: PathBuf,

        /// Directory the report tables are written to
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
    },

    /// Validate a rules file without touching any ledger
    CheckRules {
        /// Rules JSON to inspect
        #[arg(long, default_value = "rules.json")]
        rules: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            input,
            rules,
            out_dir,
        } => run(&input, &rules, &out_dir),
        Command::CheckRules { rules } => check_rules(&rules),
    }
}

fn run(input: &Path, rules_path: &Path, out_dir: &Path) -> Result<()> {
    let rules = load_rules(rules_path)?;
    for warning in rules.validate() {
        eprintln!("warning: {warning}");
    }

    let parsed = parse_ledger_csv(input)?;
    println!(
        "Parsed {} rows from {} ({} dropped)",
        parsed.rows.len(),
        input.display(),
        parsed.dropped
    );

    let records = enrich(&parsed.rows, &rules);
    let flagged = records.iter().filter(|r| r.needs_review()).count();

    // All five tables are derived before anything is written, so a
    // failure up to here leaves the output directory untouched
    let reports = ReportSet::build(records);
    reports
        .write(out_dir)
        .with_context(|| format!("writing reports to {}", out_dir.display()))?;

    println!(
        "Enriched {} records ({} flagged for review)",
        reports.enriched.len(),
        flagged
    );
    println!("Outputs in {}:", out_dir.display());
    for name in output::FILE_NAMES {
        println!("- {name}");
    }

    Ok(())
}

fn check_rules(path: &Path) -> Result<()> {
    let rules = load_rules(path)?;

    println!(
        "{}: {} merchant substitutions, {} categories",
        path.display(),
        rules.merchant_normalization.len(),
        rules.category_rules.len()
    );
    println!("Categories (precedence order): {}", rules.category_names().join(", "));

    let warnings = rules.validate();
    if warnings.is_empty() {
        println!("No warnings");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }

    Ok(())
}
