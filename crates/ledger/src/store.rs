//! Account and transaction persistence
//!
//! [`AccountStore`] is the injected storage seam: the engine and auth gate
//! only ever see the trait, so the in-memory backend can be swapped for a
//! database-backed one without touching business logic. Balance writes go
//! through [`AccountStore::apply_balance`], a compare-and-swap on the
//! account's version token, so concurrent writers cannot silently overwrite
//! each other.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use voice_banking_core::{Account, CredentialPurpose, Transaction, TransactionKind};

/// Storage-level failures. These never reach callers directly; the engine
/// maps anything unexpected to the opaque internal error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The account's version moved between read and write.
    #[error("version conflict on account {0}")]
    VersionConflict(String),

    #[error("account {0} not found")]
    NotFound(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage operations the ledger needs. All reads return owned snapshots;
/// the version token on each snapshot is what makes `apply_balance` safe.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Option<Account>>;

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Account>>;

    async fn insert(&self, account: Account) -> StoreResult<()>;

    async fn set_credential_hash(
        &self,
        id: &str,
        purpose: CredentialPurpose,
        hash: String,
    ) -> StoreResult<()>;

    /// Write a new balance if and only if the stored version still equals
    /// `expected_version`. Bumps the version on success; fails with
    /// [`StoreError::VersionConflict`] otherwise.
    async fn apply_balance(
        &self,
        id: &str,
        expected_version: u64,
        new_balance: f64,
    ) -> StoreResult<()>;

    async fn append_transaction(&self, tx: Transaction) -> StoreResult<()>;

    /// Entries involving the user as sender or receiver, newest first,
    /// optionally filtered by kind, at most `limit` entries.
    async fn transactions_for(
        &self,
        user_id: &str,
        limit: usize,
        kind: Option<TransactionKind>,
    ) -> StoreResult<Vec<Transaction>>;
}

/// In-memory backend. Accounts live in a concurrent map keyed by id; the
/// ledger is an append-only vector behind a read-write lock.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get(id).map(|a| a.value().clone()))
    }

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.value().phone == phone)
            .map(|a| a.value().clone()))
    }

    async fn insert(&self, account: Account) -> StoreResult<()> {
        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn set_credential_hash(
        &self,
        id: &str,
        purpose: CredentialPurpose,
        hash: String,
    ) -> StoreResult<()> {
        let mut account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        match purpose {
            CredentialPurpose::Login => account.login_pin_hash = Some(hash),
            CredentialPurpose::Transfer => account.transfer_pin_hash = Some(hash),
        }
        Ok(())
    }

    async fn apply_balance(
        &self,
        id: &str,
        expected_version: u64,
        new_balance: f64,
    ) -> StoreResult<()> {
        // get_mut holds the shard lock, so the check and write are atomic.
        let mut account = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if account.version != expected_version {
            return Err(StoreError::VersionConflict(id.to_string()));
        }
        account.balance = new_balance;
        account.version += 1;
        Ok(())
    }

    async fn append_transaction(&self, tx: Transaction) -> StoreResult<()> {
        self.transactions.write().push(tx);
        Ok(())
    }

    async fn transactions_for(
        &self,
        user_id: &str,
        limit: usize,
        kind: Option<TransactionKind>,
    ) -> StoreResult<Vec<Transaction>> {
        let ledger = self.transactions.read();
        Ok(ledger
            .iter()
            .rev()
            .filter(|tx| tx.involves(user_id))
            .filter(|tx| kind.map_or(true, |k| tx.kind == k))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, phone: &str, balance: f64) -> Account {
        Account::new(id, id.to_uppercase(), phone, balance)
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = MemoryAccountStore::new();
        store.insert(account("u1", "9000000001", 1000.0)).await.unwrap();

        assert!(store.get("u1").await.unwrap().is_some());
        assert!(store.get("u2").await.unwrap().is_none());
        let found = store.find_by_phone("9000000001").await.unwrap().unwrap();
        assert_eq!(found.id, "u1");
    }

    #[tokio::test]
    async fn test_apply_balance_cas() {
        let store = MemoryAccountStore::new();
        store.insert(account("u1", "9000000001", 1000.0)).await.unwrap();

        store.apply_balance("u1", 0, 900.0).await.unwrap();
        let acct = store.get("u1").await.unwrap().unwrap();
        assert_eq!(acct.balance, 900.0);
        assert_eq!(acct.version, 1);

        // a second write against the stale version must fail
        let err = store.apply_balance("u1", 0, 800.0).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict(_)));
    }

    #[tokio::test]
    async fn test_history_newest_first_with_filter() {
        let store = MemoryAccountStore::new();
        store
            .append_transaction(Transaction::transfer("u1", "u2", 10.0, None))
            .await
            .unwrap();
        store
            .append_transaction(Transaction::bill_pay("u1", 20.0, "water bill".into()))
            .await
            .unwrap();
        store
            .append_transaction(Transaction::transfer("u2", "u3", 30.0, None))
            .await
            .unwrap();

        let all = store.transactions_for("u1", 50, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].amount, 20.0);

        let bills = store
            .transactions_for("u1", 50, Some(TransactionKind::BillPay))
            .await
            .unwrap();
        assert_eq!(bills.len(), 1);

        let capped = store.transactions_for("u1", 1, None).await.unwrap();
        assert_eq!(capped.len(), 1);
    }
}
