//! Transfer Coordinator
//!
//! Moves funds between two accounts under concurrent access.
//!
//! # Locking protocol
//!
//! Each account owns its balance mutex. A transfer takes both locks, the
//! lexicographically smaller account id first, whatever the direction of the
//! transfer. Two transfers sharing an account therefore always request their
//! common lock in the same relative order, so A→B racing B→A cannot form a
//! wait cycle. Transfers on disjoint accounts never touch the same mutex.
//!
//! ```text
//! validate ─▶ resolve ─▶ lock(min id) ─▶ lock(max id) ─▶ check funds ─▶ debit+credit ─▶ notify ─▶ unlock
//! ```
//!
//! Guards are scoped: every exit path (validation failure inside the
//! critical section, lock timeout on the second account) releases whatever
//! was acquired.

use parking_lot::MutexGuard;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::TransferError;
use super::types::{TransferId, TransferReceipt, TransferRequest};
use crate::account::{Account, AccountStore};
use crate::config::CoordinatorConfig;
use crate::notification::Notifier;

type BalanceGuard<'a> = MutexGuard<'a, Decimal>;

/// Transfer Coordinator - validates and executes balance transfers
pub struct TransferCoordinator {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
    /// `None` blocks until the lock is granted
    lock_timeout: Option<Duration>,
}

impl TransferCoordinator {
    /// Create a coordinator that waits indefinitely for account locks
    pub fn new(store: Arc<dyn AccountStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_lock_timeout(store, notifier, None)
    }

    /// Create a coordinator with a bounded lock acquisition
    pub fn with_lock_timeout(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        lock_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store,
            notifier,
            lock_timeout,
        }
    }

    pub fn from_config(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        config: &CoordinatorConfig,
    ) -> Self {
        Self::with_lock_timeout(store, notifier, config.lock_timeout())
    }

    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Transfer `amount` from `account_from_id` to `account_to_id`
    pub fn transfer_money(
        &self,
        account_from_id: &str,
        account_to_id: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, TransferError> {
        self.transfer(&TransferRequest::new(account_from_id, account_to_id, amount))
    }

    /// Execute a transfer.
    ///
    /// # Validation (before any lock is taken)
    /// 1. `amount > 0`, else `InvalidAmount`
    /// 2. source != destination, else `SameAccount`
    /// 3. both accounts exist, else `AccountNotFound` (source checked first)
    /// 4. both ids resolve to different records, else `SameAccount`
    ///
    /// # Critical section (both locks held)
    /// Funds are checked, both balances written, then both owners
    /// notified. On any error nothing has been written.
    pub fn transfer(&self, req: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        if req.amount <= Decimal::ZERO {
            debug!(amount = %req.amount, "Rejected transfer: non-positive amount");
            return Err(TransferError::InvalidAmount);
        }

        if req.account_from_id == req.account_to_id {
            debug!(account_id = %req.account_from_id, "Rejected transfer: same account");
            return Err(TransferError::SameAccount);
        }

        let source = self.resolve(&req.account_from_id)?;
        let target = self.resolve(&req.account_to_id)?;

        // The store may resolve two distinct ids (aliases) to one record
        if same_record(&source, &target) {
            debug!(
                from = %req.account_from_id,
                to = %req.account_to_id,
                account_id = %source.id(),
                "Rejected transfer: ids resolve to the same account"
            );
            return Err(TransferError::SameAccount);
        }

        let transfer_id = TransferId::new();
        let (mut from_balance, mut to_balance) = self.lock_pair(&source, &target)?;

        let available = *from_balance;
        if available < req.amount {
            debug!(
                transfer_id = %transfer_id,
                account_id = %source.id(),
                balance = %available,
                amount = %req.amount,
                "Rejected transfer: insufficient funds"
            );
            return Err(TransferError::InsufficientFunds(source.id().to_string()));
        }

        // Compute both sides before writing either
        let new_from = available
            .checked_sub(req.amount)
            .ok_or(TransferError::Overflow)?;
        let new_to = to_balance
            .checked_add(req.amount)
            .ok_or(TransferError::Overflow)?;

        *from_balance = new_from;
        *to_balance = new_to;

        info!(
            transfer_id = %transfer_id,
            from = %source.id(),
            to = %target.id(),
            amount = %req.amount,
            "Transfer committed"
        );

        self.notify(
            transfer_id,
            &source,
            &format!("Transferred {} to account {}", req.amount, target.id()),
        );
        self.notify(
            transfer_id,
            &target,
            &format!("Received {} from account {}", req.amount, source.id()),
        );

        Ok(TransferReceipt {
            transfer_id,
            account_from_id: source.id().to_string(),
            account_to_id: target.id().to_string(),
            amount: req.amount,
            from_balance: new_from,
            to_balance: new_to,
            completed_at: chrono::Utc::now(),
        })
    }

    /// Read two balances under the transfer locking discipline.
    ///
    /// The pair is never observed halfway through a transfer between the
    /// two accounts.
    pub fn balances(
        &self,
        first_id: &str,
        second_id: &str,
    ) -> Result<(Decimal, Decimal), TransferError> {
        let first = self.resolve(first_id)?;
        let second = self.resolve(second_id)?;
        if same_record(&first, &second) {
            let balance = *self.acquire(&first)?;
            return Ok((balance, balance));
        }

        let (a, b) = self.lock_pair(&first, &second)?;
        Ok((*a, *b))
    }

    fn resolve(&self, account_id: &str) -> Result<Arc<Account>, TransferError> {
        self.store.get_account(account_id).ok_or_else(|| {
            debug!(account_id = %account_id, "Rejected transfer: account not found");
            TransferError::AccountNotFound(account_id.to_string())
        })
    }

    /// Lock two distinct accounts in id order.
    ///
    /// Callers must have ruled out `same_record`: the mutex is not reentrant.
    ///
    /// Guards are returned in argument order, not lock order.
    fn lock_pair<'a>(
        &self,
        a: &'a Account,
        b: &'a Account,
    ) -> Result<(BalanceGuard<'a>, BalanceGuard<'a>), TransferError> {
        let a_first = a.id() < b.id();
        let (first, second) = if a_first { (a, b) } else { (b, a) };

        let first_guard = self.acquire(first)?;
        let second_guard = self.acquire(second)?;
        debug!(first = %first.id(), second = %second.id(), "Account locks acquired");

        if a_first {
            Ok((first_guard, second_guard))
        } else {
            Ok((second_guard, first_guard))
        }
    }

    fn acquire<'a>(&self, account: &'a Account) -> Result<BalanceGuard<'a>, TransferError> {
        account.lock_balance(self.lock_timeout).ok_or_else(|| {
            warn!(
                account_id = %account.id(),
                timeout_ms = self.lock_timeout.map(|t| t.as_millis() as u64),
                "Lock acquisition timed out"
            );
            TransferError::LockTimeout(account.id().to_string())
        })
    }

    /// Best-effort: a failed notification never reverts the transfer
    fn notify(&self, transfer_id: TransferId, account: &Account, message: &str) {
        if let Err(e) = self.notifier.notify_about_transfer(account, message) {
            warn!(
                transfer_id = %transfer_id,
                account_id = %account.id(),
                error = %e,
                "Notification failed (transfer remains committed)"
            );
        }
    }
}

/// Same `Arc`, or two records claiming one id
fn same_record(a: &Arc<Account>, b: &Arc<Account>) -> bool {
    Arc::ptr_eq(a, b) || a.id() == b.id()
}
