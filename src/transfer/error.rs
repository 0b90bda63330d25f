//! Transfer Error Types
//!
//! Every variant is a synchronous validation failure: when one is returned,
//! no balance has been touched.

use thiserror::Error;

/// Transfer error types
///
/// Error codes are stable strings for outer layers to translate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Transfer amount must be positive")]
    InvalidAmount,

    #[error("Source and destination account cannot be the same")]
    SameAccount,

    // === Account Errors ===
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Insufficient funds in account {0}")]
    InsufficientFunds(String),

    #[error("Amount would cause overflow")]
    Overflow,

    // === Contention ===
    #[error("Timed out waiting for lock on account {0}")]
    LockTimeout(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            TransferError::Overflow => "OVERFLOW",
            TransferError::LockTimeout(_) => "LOCK_TIMEOUT",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidAmount | TransferError::SameAccount => 400,
            TransferError::AccountNotFound(_) => 404,
            TransferError::InsufficientFunds(_) | TransferError::Overflow => 422,
            TransferError::LockTimeout(_) => 503,
        }
    }
}
