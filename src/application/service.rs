use crate::domain::{Category, Cents, create_spend_chart, format_cents};

use super::AppError;

/// A set of named budget categories kept in creation order.
/// This is the primary interface for any client (CLI, journal replay, tests).
#[derive(Debug, Clone, Default)]
pub struct Budget {
    categories: Vec<Category>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Category operations
    // ========================

    /// Create a new, empty category.
    pub fn create_category(&mut self, name: impl Into<String>) -> Result<&Category, AppError> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(AppError::CategoryAlreadyExists(name));
        }

        tracing::debug!(category = %name, "created category");
        self.categories.push(Category::new(name));
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Get a category by name.
    pub fn category(&self, name: &str) -> Result<&Category, AppError> {
        self.position(name)
            .map(|idx| &self.categories[idx])
            .ok_or_else(|| AppError::CategoryNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All categories in creation order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    // ========================
    // Ledger operations
    // ========================

    pub fn deposit(
        &mut self,
        name: &str,
        amount: Cents,
        description: Option<&str>,
    ) -> Result<(), AppError> {
        validate_amount(amount)?;
        let category = self.category_mut(name)?;
        check_headroom(category, amount)?;
        category.deposit(amount, description);

        tracing::debug!(category = name, amount = %format_cents(amount), "deposit");
        Ok(())
    }

    /// Withdraw from a category, failing without side effects if it would
    /// overdraw.
    pub fn withdraw(
        &mut self,
        name: &str,
        amount: Cents,
        description: Option<&str>,
    ) -> Result<(), AppError> {
        validate_amount(amount)?;
        let category = self.category_mut(name)?;
        if !category.withdraw(amount, description) {
            let err = AppError::InsufficientFunds {
                category: name.to_string(),
                balance: category.balance(),
                required: amount,
            };
            tracing::warn!(error = %err, "withdrawal rejected");
            return Err(err);
        }

        tracing::debug!(category = name, amount = %format_cents(amount), "withdrawal");
        Ok(())
    }

    /// Transfer between two distinct categories. Either both ledgers gain
    /// an entry or neither does.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Cents) -> Result<(), AppError> {
        validate_amount(amount)?;
        let from_idx = self
            .position(from)
            .ok_or_else(|| AppError::CategoryNotFound(from.to_string()))?;
        let to_idx = self
            .position(to)
            .ok_or_else(|| AppError::CategoryNotFound(to.to_string()))?;
        if from_idx == to_idx {
            return Err(AppError::SelfTransfer(from.to_string()));
        }

        let (source, destination) = pair_mut(&mut self.categories, from_idx, to_idx);
        check_headroom(destination, amount)?;
        if !source.transfer(amount, destination) {
            let err = AppError::InsufficientFunds {
                category: from.to_string(),
                balance: source.balance(),
                required: amount,
            };
            tracing::warn!(error = %err, to, "transfer rejected");
            return Err(err);
        }

        tracing::debug!(from, to, amount = %format_cents(amount), "transfer");
        Ok(())
    }

    // ========================
    // Views
    // ========================

    /// Receipt text for one category.
    pub fn receipt(&self, name: &str) -> Result<String, AppError> {
        self.category(name).map(Category::render)
    }

    /// Spend chart over the named categories in the given order, or over
    /// every category when `names` is empty.
    pub fn spend_chart(&self, names: &[String]) -> Result<String, AppError> {
        if names.is_empty() {
            return Ok(create_spend_chart(&self.categories));
        }
        let selected = names
            .iter()
            .map(|name| self.category(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(create_spend_chart(&selected))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name() == name)
    }

    fn category_mut(&mut self, name: &str) -> Result<&mut Category, AppError> {
        let idx = self
            .position(name)
            .ok_or_else(|| AppError::CategoryNotFound(name.to_string()))?;
        Ok(&mut self.categories[idx])
    }
}

/// Reject non-positive amounts.
pub fn validate_amount(amount: Cents) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount(format!(
            "{} (must be positive)",
            format_cents(amount)
        )));
    }
    Ok(())
}

/// Reject a deposit that would push the balance past `Cents::MAX`.
fn check_headroom(category: &Category, amount: Cents) -> Result<(), AppError> {
    if category.balance().checked_add(amount).is_none() {
        return Err(AppError::InvalidAmount(format!(
            "{} would overflow the balance of {}",
            format_cents(amount),
            category.name()
        )));
    }
    Ok(())
}

/// Borrow two distinct elements mutably.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
