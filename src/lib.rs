//! Transfer Coordinator - concurrent balance transfers between accounts
//!
//! Moves funds between in-memory accounts without lost updates and without
//! deadlocks, using per-account locks taken in account-id order.
//!
//! # Modules
//!
//! - [`account`] - Account record, snapshot and keyed store
//! - [`notification`] - Transfer notification sinks
//! - [`transfer`] - Transfer coordinator, request/receipt types, errors
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup

pub mod account;
pub mod config;
pub mod logging;
pub mod notification;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountError, AccountSnapshot, AccountStore, InMemoryAccountStore};
pub use config::{AppConfig, CoordinatorConfig};
pub use notification::{LoggingNotifier, NotificationError, Notifier, RecordingNotifier};
pub use transfer::{TransferCoordinator, TransferError, TransferId, TransferReceipt, TransferRequest};
