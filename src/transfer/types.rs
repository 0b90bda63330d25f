//! Transfer Core Types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Transfer ID - random UUID v4, one per executed transfer.
///
/// Used as the `transfer_id` field on every log line of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(Uuid);

impl TransferId {
    /// Generate a new unique TransferId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransferId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Transfer request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Account to debit
    pub account_from_id: String,
    /// Account to credit
    pub account_to_id: String,
    /// Must be strictly positive
    pub amount: Decimal,
}

impl TransferRequest {
    /// Create a new transfer request
    pub fn new(
        account_from_id: impl Into<String>,
        account_to_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            account_from_id: account_from_id.into(),
            account_to_id: account_to_id.into(),
            amount,
        }
    }
}

/// Outcome of a committed transfer.
///
/// Balances are the values written inside the critical section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transfer_id: TransferId,
    pub account_from_id: String,
    pub account_to_id: String,
    pub amount: Decimal,
    pub from_balance: Decimal,
    pub to_balance: Decimal,
    pub completed_at: DateTime<Utc>,
}
