use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::Budget;
use crate::domain::{Cents, Transaction};

/// Budget snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub categories: Vec<CategorySnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub name: String,
    pub balance: Cents,
    pub ledger: Vec<Transaction>,
}

/// Exporter for converting budget data to various formats
pub struct Exporter<'a> {
    budget: &'a Budget,
}

impl<'a> Exporter<'a> {
    pub fn new(budget: &'a Budget) -> Self {
        Self { budget }
    }

    /// Export every ledger entry to CSV, one row per entry. Returns the
    /// number of rows written.
    pub fn export_ledger_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "entry", "amount_cents", "description"])?;

        let mut count = 0;
        for category in self.budget.categories() {
            for (idx, entry) in category.ledger().iter().enumerate() {
                csv_writer.write_record([
                    category.name(),
                    (idx + 1).to_string().as_str(),
                    entry.amount.to_string().as_str(),
                    entry.description.as_str(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            categories: self
                .budget
                .categories()
                .iter()
                .map(|category| CategorySnapshot {
                    name: category.name().to_string(),
                    balance: category.balance(),
                    ledger: category.ledger().to_vec(),
                })
                .collect(),
        }
    }

    /// Export the full budget as a JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<BudgetSnapshot> {
        let snapshot = self.snapshot();

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
