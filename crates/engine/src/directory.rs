use ledger::AccountLedger;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Maps authenticated identity to the account ledger instance for that
/// identity. Accounts live for the lifetime of the process; nothing is
/// ever deleted in normal operation.
///
/// Each ledger is wrapped in its own `Mutex`, so operations on the same
/// account serialize against each other while operations on different
/// accounts proceed in parallel. The outer `RwLock` only guards the map
/// itself and is never held across an await on a ledger lock.
#[derive(Default)]
pub struct AccountDirectory {
    accounts: RwLock<HashMap<String, Arc<Mutex<AccountLedger>>>>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing account for `identity`, or atomically creates
    /// and registers a zero-balance one.
    ///
    /// Double-checked: the read-lock fast path covers the steady state, and
    /// the write-lock insert uses `entry` so two concurrent first-operations
    /// for the same new identity always resolve to the same account.
    pub async fn resolve(&self, identity: &str) -> Arc<Mutex<AccountLedger>> {
        if let Some(account) = self.accounts.read().await.get(identity) {
            return account.clone();
        }

        let mut accounts = self.accounts.write().await;
        accounts
            .entry(identity.to_string())
            .or_insert_with(|| {
                tracing::info!(identity, "Creating new account.");
                Arc::new(Mutex::new(AccountLedger::new()))
            })
            .clone()
    }

    /// Returns the account for `identity` only if it already exists.
    /// Read-only queries use this so a directory miss can surface as an
    /// error instead of materializing an empty account.
    pub async fn lookup(&self, identity: &str) -> Option<Arc<Mutex<AccountLedger>>> {
        self.accounts.read().await.get(identity).cloned()
    }
}
