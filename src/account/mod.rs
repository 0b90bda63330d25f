//! Account module
//!
//! In-memory storage for balance-holding accounts.

pub mod error;
pub mod models;
pub mod repository;

// Re-export commonly used types
pub use error::AccountError;
pub use models::{Account, AccountSnapshot};
pub use repository::{AccountStore, InMemoryAccountStore};
