//! Repository layer for account lookup

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::debug;

use super::error::AccountError;
use super::models::{Account, AccountSnapshot};

/// Keyed storage of account records.
///
/// The transfer coordinator only ever calls `get_account`; the other
/// operations exist for whoever owns account lifecycle.
pub trait AccountStore: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    /// `DuplicateAccountId` if an account with the same id already exists.
    fn create_account(&self, account: Account) -> Result<(), AccountError>;

    /// Look up an account by id.
    fn get_account(&self, account_id: &str) -> Option<Arc<Account>>;

    /// All accounts, sorted by id.
    fn snapshot(&self) -> Vec<AccountSnapshot>;

    /// Remove every account.
    fn clear_accounts(&self);
}

/// In-memory account store. Uses DashMap for concurrent access.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<String, Arc<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create_account(&self, account: Account) -> Result<(), AccountError> {
        match self.accounts.entry(account.id().to_string()) {
            Entry::Occupied(e) => Err(AccountError::DuplicateAccountId(e.key().clone())),
            Entry::Vacant(e) => {
                debug!(account_id = %account.id(), "Account created");
                e.insert(Arc::new(account));
                Ok(())
            }
        }
    }

    fn get_account(&self, account_id: &str) -> Option<Arc<Account>> {
        self.accounts.get(account_id).map(|a| a.value().clone())
    }

    fn snapshot(&self) -> Vec<AccountSnapshot> {
        // Clone the Arcs first so no shard guard is held while balance locks are taken
        let accounts: Vec<Arc<Account>> = self.accounts.iter().map(|e| e.value().clone()).collect();
        let mut snapshots: Vec<AccountSnapshot> = accounts.iter().map(|a| a.snapshot()).collect();
        snapshots.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        snapshots
    }

    fn clear_accounts(&self) {
        self.accounts.clear();
    }
}
