//! Account Error Types

use thiserror::Error;

/// Errors raised while constructing or registering accounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account id must not be empty")]
    InvalidAccountId,

    #[error("Initial balance must be non-negative")]
    NegativeBalance,

    #[error("Account id {0} already exists!")]
    DuplicateAccountId(String),
}

impl AccountError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::InvalidAccountId => "INVALID_ACCOUNT_ID",
            AccountError::NegativeBalance => "NEGATIVE_BALANCE",
            AccountError::DuplicateAccountId(_) => "DUPLICATE_ACCOUNT_ID",
        }
    }
}
