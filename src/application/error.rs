use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(String),

    #[error("Insufficient funds in category {category}: balance {balance}, required {required}")]
    InsufficientFunds {
        category: String,
        balance: Cents,
        required: Cents,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot transfer from category {0} to itself")]
    SelfTransfer(String),
}
