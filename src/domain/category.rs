use std::fmt;

use super::text::{center, ljust, rjust, truncate};
use super::{Cents, Transaction, format_cents};

const TITLE_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 23;
const AMOUNT_WIDTH: usize = 7;

/// A budget category owning an append-only ledger.
///
/// The balance is never stored; it is recomputed from the ledger on every
/// call. A withdrawal or transfer that would overdraw the category leaves
/// the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    ledger: Vec<Transaction>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ledger: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ledger entries in insertion order.
    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Record a deposit. A missing description is stored as "".
    pub fn deposit(&mut self, amount: Cents, description: Option<&str>) {
        self.ledger
            .push(Transaction::new(amount, description.unwrap_or_default()));
    }

    pub fn check_funds(&self, amount: Cents) -> bool {
        self.balance() >= amount
    }

    /// Record a withdrawal as a negative entry.
    /// Returns false and records nothing if funds are insufficient.
    pub fn withdraw(&mut self, amount: Cents, description: Option<&str>) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        self.ledger
            .push(Transaction::new(-amount, description.unwrap_or_default()));
        true
    }

    /// Move `amount` into `destination`, recording a withdrawal here and a
    /// deposit there. Returns false and touches neither ledger if funds
    /// are insufficient.
    pub fn transfer(&mut self, amount: Cents, destination: &mut Category) -> bool {
        if !self.check_funds(amount) {
            return false;
        }
        let to = format!("Transfer to {}", destination.name);
        let from = format!("Transfer from {}", self.name);
        // Funds were checked above, so neither step can be rejected
        self.ledger.push(Transaction::new(-amount, to));
        destination.deposit(amount, Some(from.as_str()));
        true
    }

    pub fn balance(&self) -> Cents {
        self.ledger.iter().map(|t| t.amount).sum()
    }

    /// Sum of all withdrawal entries (zero or negative). Widened to `i128`
    /// since withdrawals accumulate past any single balance.
    pub fn spent(&self) -> i128 {
        self.ledger
            .iter()
            .filter(|t| t.is_withdrawal())
            .map(|t| i128::from(t.amount))
            .sum()
    }

    /// Render the receipt: a starred title line, one line per entry and
    /// the total.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", center(&self.name, TITLE_WIDTH, '*'))?;
        for entry in &self.ledger {
            let description = ljust(
                truncate(&entry.description, DESCRIPTION_WIDTH),
                DESCRIPTION_WIDTH,
            );
            let amount = format_cents(entry.amount);
            let amount = rjust(truncate(&amount, AMOUNT_WIDTH), AMOUNT_WIDTH);
            writeln!(f, "{}{}", description, amount)?;
        }
        write!(f, "Total: {}", format_cents(self.balance()))
    }
}
