use thiserror::Error;

use crate::transaction::models::TransactionId;

/// Error type for TransactionId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for Category validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category is empty")]
    Empty,

    #[error("Category too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TransactionName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionNameError {
    #[error("Transaction name is empty")]
    Empty,

    #[error("Transaction name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for Currency validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Currency must be a three letter code, got {0:?}")]
    InvalidCode(String),
}

/// Top-level error type for all transaction-related operations
#[derive(Debug, Clone, Error)]
pub enum TransactionError {
    #[error("Invalid transaction ID: {0}")]
    InvalidTransactionId(#[from] TransactionIdError),

    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] CategoryError),

    #[error("Invalid transaction name: {0}")]
    InvalidName(#[from] TransactionNameError),

    #[error("Invalid currency: {0}")]
    InvalidCurrency(#[from] CurrencyError),

    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
