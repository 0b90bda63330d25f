//! Transfer Notifications
//!
//! Out-of-band delivery of "you sent / you received" messages after a
//! transfer commits. Delivery is best-effort: the coordinator logs a failed
//! notification and keeps the committed balances.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::info;

use crate::account::Account;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Notification sink for completed transfers.
///
/// Called from inside the transfer critical section, with the balance lock
/// of `account` held. Implementations must only use `Account::id` and must
/// not call back into the coordinator or read balances.
pub trait Notifier: Send + Sync {
    fn notify_about_transfer(&self, account: &Account, message: &str)
    -> Result<(), NotificationError>;
}

/// Writes every notification to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify_about_transfer(
        &self,
        account: &Account,
        message: &str,
    ) -> Result<(), NotificationError> {
        info!(account_id = %account.id(), "Sending notification to owner: {}", message);
        Ok(())
    }
}

/// Keeps delivered notifications in memory, in delivery order.
///
/// Can be switched into a failing mode, in which every call returns
/// `NotificationError::Delivery` and nothing is recorded.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All `(account_id, message)` pairs delivered so far
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// Messages delivered to one account
    pub fn messages_for(&self, account_id: &str) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(id, _)| id == account_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_about_transfer(
        &self,
        account: &Account,
        message: &str,
    ) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery(format!(
                "recipient {} unreachable",
                account.id()
            )));
        }
        self.sent
            .lock()
            .push((account.id().to_string(), message.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_logging_notifier_always_succeeds() {
        let account = Account::new("Id-1", dec!(10)).unwrap();
        assert!(LoggingNotifier.notify_about_transfer(&account, "hello").is_ok());
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        let a = Account::new("A", dec!(1)).unwrap();
        let b = Account::new("B", dec!(1)).unwrap();

        notifier.notify_about_transfer(&a, "first").unwrap();
        notifier.notify_about_transfer(&b, "second").unwrap();
        notifier.notify_about_transfer(&a, "third").unwrap();

        assert_eq!(notifier.count(), 3);
        assert_eq!(notifier.sent()[1], ("B".to_string(), "second".to_string()));
        assert_eq!(notifier.messages_for("A"), vec!["first", "third"]);
    }

    #[test]
    fn test_recording_notifier_failure_mode() {
        let notifier = RecordingNotifier::new();
        let a = Account::new("A", dec!(1)).unwrap();
        notifier.set_failing(true);

        let err = notifier.notify_about_transfer(&a, "lost").unwrap_err();
        assert_eq!(
            err,
            NotificationError::Delivery("recipient A unreachable".to_string())
        );
        assert_eq!(notifier.count(), 0);

        notifier.set_failing(false);
        notifier.notify_about_transfer(&a, "delivered").unwrap();
        assert_eq!(notifier.count(), 1);
    }
}
