//! Data models for balance-holding accounts

use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::error::AccountError;

/// A balance-holding account.
///
/// # Invariants (enforced by private fields):
/// 1. `account_id` is immutable after creation
/// 2. `balance` is only reachable through its own mutex
/// 3. `balance` never goes negative
///
/// Accounts are shared as `Arc<Account>` between the store and the
/// coordinator. The mutex is owned by the record itself, so two transfers
/// only contend when they touch the same account.
pub struct Account {
    account_id: String,
    balance: Mutex<Decimal>,
}

impl Account {
    /// Create an account with an opening balance.
    ///
    /// # Errors
    /// - `InvalidAccountId` if the id is empty or blank
    /// - `NegativeBalance` if `balance < 0`
    pub fn new(account_id: impl Into<String>, balance: Decimal) -> Result<Self, AccountError> {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return Err(AccountError::InvalidAccountId);
        }
        if balance < Decimal::ZERO {
            return Err(AccountError::NegativeBalance);
        }
        Ok(Self {
            account_id,
            balance: Mutex::new(balance),
        })
    }

    /// Create an account with a zero balance.
    pub fn with_zero_balance(account_id: impl Into<String>) -> Result<Self, AccountError> {
        Self::new(account_id, Decimal::ZERO)
    }

    /// Read-only access to the account id. Never takes the balance lock.
    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.account_id
    }

    /// Current balance.
    ///
    /// Takes the balance lock for the duration of the read. Must not be
    /// called by a thread that already holds this account's lock.
    pub fn balance(&self) -> Decimal {
        *self.balance.lock()
    }

    /// Point-in-time view of this account.
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            account_id: self.account_id.clone(),
            balance: self.balance(),
        }
    }

    /// Acquire the balance lock, optionally bounded by `timeout`.
    ///
    /// Returns `None` only when a bounded acquisition expires.
    pub(crate) fn lock_balance(&self, timeout: Option<Duration>) -> Option<MutexGuard<'_, Decimal>> {
        match timeout {
            Some(t) => self.balance.try_lock_for(t),
            None => Some(self.balance.lock()),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_lock: Debug may run inside a critical section
        let mut s = f.debug_struct("Account");
        s.field("account_id", &self.account_id);
        match self.balance.try_lock() {
            Some(balance) => s.field("balance", &*balance),
            None => s.field("balance", &"<locked>"),
        };
        s.finish()
    }
}

/// Serializable point-in-time view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_id: String,
    pub balance: Decimal,
}
