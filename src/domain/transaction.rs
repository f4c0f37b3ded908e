use serde::{Deserialize, Serialize};

use super::Cents;

/// A single ledger entry. Positive amounts are deposits, negative amounts
/// are withdrawals. Entries are never edited once appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Cents,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn new(amount: Cents, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < 0
    }
}
