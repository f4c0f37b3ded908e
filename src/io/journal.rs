use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{Budget, validate_amount};
use crate::domain::{Cents, parse_cents};

/// One operation in a budget journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum JournalEntry {
    Create {
        category: String,
    },
    Deposit {
        category: String,
        amount: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Withdraw {
        category: String,
        amount: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Transfer {
        category: String,
        to: String,
        amount: String,
    },
}

impl JournalEntry {
    /// Apply this entry to `budget`. Deposits and withdrawals create their
    /// category on first use; transfers need both categories to exist.
    pub fn apply(&self, budget: &mut Budget) -> Result<(), String> {
        match self {
            JournalEntry::Create { category } => {
                budget
                    .create_category(category.as_str())
                    .map_err(|e| e.to_string())?;
            }
            JournalEntry::Deposit {
                category,
                amount,
                description,
            } => {
                let amount = parse_amount(amount)?;
                validate_amount(amount).map_err(|e| e.to_string())?;
                ensure_category(budget, category)?;
                budget
                    .deposit(category, amount, description.as_deref())
                    .map_err(|e| e.to_string())?;
            }
            JournalEntry::Withdraw {
                category,
                amount,
                description,
            } => {
                let amount = parse_amount(amount)?;
                validate_amount(amount).map_err(|e| e.to_string())?;
                ensure_category(budget, category)?;
                budget
                    .withdraw(category, amount, description.as_deref())
                    .map_err(|e| e.to_string())?;
            }
            JournalEntry::Transfer {
                category,
                to,
                amount,
            } => {
                let amount = parse_amount(amount)?;
                budget
                    .transfer(category, to, amount)
                    .map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }
}

fn parse_amount(amount: &str) -> Result<Cents, String> {
    parse_cents(amount).map_err(|e| format!("Invalid amount '{}': {}", amount, e))
}

fn ensure_category(budget: &mut Budget, name: &str) -> Result<(), String> {
    if !budget.contains(name) {
        budget.create_category(name).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Flat CSV row: `op,category,amount,description,to`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    op: String,
    category: String,
    amount: Option<String>,
    description: Option<String>,
    to: Option<String>,
}

impl TryFrom<CsvRow> for JournalEntry {
    type Error = String;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let amount = || row.amount.clone().ok_or_else(|| "Missing amount".to_string());
        match row.op.trim().to_lowercase().as_str() {
            "create" => Ok(JournalEntry::Create {
                category: row.category,
            }),
            "deposit" => Ok(JournalEntry::Deposit {
                amount: amount()?,
                category: row.category,
                description: row.description,
            }),
            "withdraw" => Ok(JournalEntry::Withdraw {
                amount: amount()?,
                category: row.category,
                description: row.description,
            }),
            "transfer" => Ok(JournalEntry::Transfer {
                amount: amount()?,
                to: row.to.ok_or_else(|| "Missing transfer destination".to_string())?,
                category: row.category,
            }),
            other => Err(format!("Unknown operation '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalFormat {
    Json,
    Csv,
}

impl JournalFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for JournalFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(JournalFormat::Json),
            "csv" => Ok(JournalFormat::Csv),
            _ => Err(format!("Invalid format '{}'. Valid formats: json, csv", s)),
        }
    }
}

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to read journal: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON journal: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV journal: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot infer journal format for {0}; pass --format json|csv")]
    UnknownFormat(String),
}

/// Result of replaying a journal
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    pub applied: usize,
    pub errors: Vec<ReplayError>,
}

impl ReplayResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error that occurred while replaying one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// 1-based entry number
    pub entry: usize,
    pub error: String,
}

/// Replays journal entries into a budget
pub struct Replayer<'a> {
    budget: &'a mut Budget,
}

impl<'a> Replayer<'a> {
    pub fn new(budget: &'a mut Budget) -> Self {
        Self { budget }
    }

    /// Apply entries in order. A rejected entry is recorded and replay
    /// continues with the next one.
    pub fn replay<I>(&mut self, entries: I) -> ReplayResult
    where
        I: IntoIterator<Item = Result<JournalEntry, String>>,
    {
        let mut result = ReplayResult::default();

        for (idx, entry) in entries.into_iter().enumerate() {
            let number = idx + 1;
            match entry.and_then(|e| e.apply(&mut *self.budget)) {
                Ok(()) => result.applied += 1,
                Err(error) => {
                    tracing::warn!(entry = number, %error, "journal entry rejected");
                    result.errors.push(ReplayError {
                        entry: number,
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            applied = result.applied,
            rejected = result.errors.len(),
            "journal replayed"
        );
        result
    }

    /// Replay a JSON array of entries. A malformed document fails as a whole.
    pub fn replay_json<R: Read>(&mut self, reader: R) -> Result<ReplayResult, JournalError> {
        let entries: Vec<JournalEntry> = serde_json::from_reader(reader)?;
        Ok(self.replay(entries.into_iter().map(Ok)))
    }

    /// Replay CSV rows. Rows that fail to parse are reported individually.
    pub fn replay_csv<R: Read>(&mut self, reader: R) -> Result<ReplayResult, JournalError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        csv_reader.headers()?;
        let entries: Vec<Result<JournalEntry, String>> = csv_reader
            .deserialize::<CsvRow>()
            .map(|row| {
                row.map_err(|e| format!("CSV parse error: {}", e))
                    .and_then(JournalEntry::try_from)
            })
            .collect();
        Ok(self.replay(entries))
    }

    pub fn replay_reader<R: Read>(
        &mut self,
        reader: R,
        format: JournalFormat,
    ) -> Result<ReplayResult, JournalError> {
        match format {
            JournalFormat::Json => self.replay_json(reader),
            JournalFormat::Csv => self.replay_csv(reader),
        }
    }
}

/// Build a budget from a journal file. The format is inferred from the
/// extension when not given.
pub fn load_journal(
    path: &Path,
    format: Option<JournalFormat>,
) -> Result<(Budget, ReplayResult), JournalError> {
    let format = format
        .or_else(|| JournalFormat::from_path(path))
        .ok_or_else(|| JournalError::UnknownFormat(path.display().to_string()))?;
    let file = File::open(path)?;

    let mut budget = Budget::new();
    let result = Replayer::new(&mut budget).replay_reader(file, format)?;
    Ok((budget, result))
}
