//! Account-to-account transfers
//!
//! # Safety Invariants
//!
//! 1. **Validate-Before-Lock**: amount, distinct ids, account existence and
//!    distinct records are checked before any balance lock is taken
//! 2. **Ordered Locking**: both account locks are taken smaller id first
//! 3. **Check Under Lock**: funds are checked only while both locks are held
//! 4. **All-Or-Nothing**: debit and credit are written together or not at all
//! 5. **Best-Effort Notify**: a failed notification never reverts a transfer

pub mod coordinator;
pub mod error;
pub mod types;


// Re-exports for convenience
pub use coordinator::TransferCoordinator;
pub use error::TransferError;
pub use types::{TransferId, TransferReceipt, TransferRequest};
