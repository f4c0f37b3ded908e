use std::fs::File;
use std::io::{Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::Budget;
use crate::domain::format_cents;
use crate::io::{Exporter, JournalFormat, load_journal};

/// Budgetbook - per-category budget ledgers
#[derive(Parser, Debug)]
#[command(name = "budgetbook")]
#[command(about = "Replay a budget journal and print receipts or spend charts")]
#[command(version)]
pub struct Cli {
    /// Journal file with the budget operations to replay
    #[arg(short, long, global = true, default_value = "budget.json")]
    pub journal: PathBuf,

    /// Journal format: json, csv (inferred from the extension if omitted)
    #[arg(short, long, global = true)]
    pub format: Option<JournalFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the receipt for a category, or for all categories
    Receipt {
        /// Category name (omit for all categories)
        category: Option<String>,
    },

    /// Print the spend chart
    Chart {
        /// Categories to chart, in column order (omit for all categories)
        categories: Vec<String>,
    },

    /// Show the balance of a category, or of all categories
    Balance {
        /// Category name (omit for all categories)
        category: Option<String>,
    },

    /// Export ledgers to CSV or the whole budget to JSON
    Export {
        /// What to export: ledger, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Install the global subscriber. `RUST_LOG` takes precedence over
    /// `--verbose`.
    pub fn init_tracing(&self) {
        use tracing_subscriber::{EnvFilter, fmt};

        let default = if self.verbose {
            "budgetbook=debug"
        } else {
            "budgetbook=warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(self) -> Result<()> {
        let mut out = stdout().lock();
        self.execute(&mut out)
    }

    /// Replay the journal and write the command's output to `out`.
    /// Rejected journal entries are reported on stderr.
    pub fn execute<W: Write>(self, out: &mut W) -> Result<()> {
        let (budget, replay) = load_journal(&self.journal, self.format)
            .with_context(|| format!("Failed to load journal {}", self.journal.display()))?;

        for error in &replay.errors {
            eprintln!("Entry {}: {}", error.entry, error.error);
        }
        if self.verbose {
            eprintln!(
                "Replayed {} entries ({} rejected)",
                replay.applied + replay.errors.len(),
                replay.errors.len()
            );
        }

        match self.command {
            Commands::Receipt { category } => run_receipt_command(&budget, category, out)?,
            Commands::Chart { categories } => {
                let chart = budget.spend_chart(&categories)?;
                writeln!(out, "{}", chart)?;
            }
            Commands::Balance { category } => run_balance_command(&budget, category, out)?,
            Commands::Export {
                export_type,
                output,
            } => run_export_command(&budget, &export_type, output, out)?,
        }

        Ok(())
    }
}

fn run_receipt_command<W: Write>(
    budget: &Budget,
    category: Option<String>,
    out: &mut W,
) -> Result<()> {
    match category {
        Some(name) => writeln!(out, "{}", budget.receipt(&name)?)?,
        None => {
            if budget.categories().is_empty() {
                writeln!(out, "No categories found.")?;
            }
            for (idx, category) in budget.categories().iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}", category)?;
            }
        }
    }
    Ok(())
}

fn run_balance_command<W: Write>(
    budget: &Budget,
    category: Option<String>,
    out: &mut W,
) -> Result<()> {
    let categories = match category {
        Some(name) => vec![budget.category(&name)?],
        None => budget.categories().iter().collect(),
    };

    if categories.is_empty() {
        writeln!(out, "No categories found.")?;
        return Ok(());
    }

    writeln!(out, "{:<20} {:>12}", "CATEGORY", "BALANCE")?;
    writeln!(out, "{}", "-".repeat(33))?;
    for category in categories {
        writeln!(
            out,
            "{:<20} {:>12}",
            category.name(),
            format_cents(category.balance())
        )?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportType {
    Ledger,
    Full,
}

impl ExportType {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "ledger" => Ok(ExportType::Ledger),
            "full" => Ok(ExportType::Full),
            _ => anyhow::bail!("Invalid export type '{}'. Valid types: ledger, full", s),
        }
    }
}

fn run_export_command<W: Write>(
    budget: &Budget,
    export_type: &str,
    output: Option<PathBuf>,
    out: &mut W,
) -> Result<()> {
    // Checked before the output file is created
    let export_type = ExportType::parse(export_type)?;
    let exporter = Exporter::new(budget);

    let writer: Box<dyn Write + '_> = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(out),
    };

    match export_type {
        ExportType::Ledger => {
            let count = exporter.export_ledger_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} ledger entries", count);
            }
        }
        ExportType::Full => {
            let snapshot = exporter.export_full_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported full budget: {} categories",
                    snapshot.categories.len()
                );
            }
        }
    }

    Ok(())
}
