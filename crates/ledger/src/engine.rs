//! Atomic money movement
//!
//! Every mutation follows the same shape: validate first, fail fast before
//! touching storage, then apply balance writes through the store's
//! compare-and-swap. A conflicting write restarts the whole operation from
//! a fresh read, up to a bounded retry count; a failure after the debit has
//! landed triggers a compensating write so no money is created or lost.

use std::sync::Arc;

use tracing::{error, warn};
use uuid::Uuid;

use voice_banking_config::constants::{history, ledger};
use voice_banking_core::{
    round2, validate_amount, Account, Error, Result, Transaction, TransactionKind,
};

use crate::store::{AccountStore, StoreError};

/// Outcome of a successful debit operation.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub transaction_id: Uuid,
    /// Sender balance after the debit.
    pub new_balance: f64,
}

/// The only component allowed to change account balances.
pub struct LedgerEngine {
    store: Arc<dyn AccountStore>,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Move `amount` from sender to receiver. Either both balance writes
    /// and the ledger entry land, or none of them do.
    pub async fn transfer(
        &self,
        sender_id: &str,
        receiver_id: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<TransferReceipt> {
        let amount = validate_amount(amount)?;
        if sender_id == receiver_id {
            return Err(Error::SelfTransfer);
        }

        for attempt in 0..ledger::MAX_CAS_RETRIES {
            let sender = self
                .load(sender_id)
                .await?
                .ok_or(Error::AccountNotFound)?;
            let receiver = self
                .load(receiver_id)
                .await?
                .ok_or_else(|| Error::ReceiverNotFound(receiver_id.to_string()))?;

            if sender.balance < amount {
                return Err(Error::InsufficientFunds {
                    balance: sender.balance,
                    requested: amount,
                });
            }

            let debited = round2(sender.balance - amount);
            match self
                .store
                .apply_balance(sender_id, sender.version, debited)
                .await
            {
                Ok(()) => {}
                Err(StoreError::VersionConflict(_)) => {
                    warn!(attempt, sender_id, "debit raced with another write, retrying");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, sender_id, "debit write failed");
                    return Err(Error::Internal);
                }
            }

            let credited = round2(receiver.balance + amount);
            match self
                .store
                .apply_balance(receiver_id, receiver.version, credited)
                .await
            {
                Ok(()) => {}
                Err(StoreError::VersionConflict(_)) => {
                    // undo the debit before restarting from a fresh read; a
                    // retry on top of an unreturned debit would charge the
                    // sender twice
                    if !self.compensate(sender_id, amount).await {
                        return Err(Error::Internal);
                    }
                    warn!(attempt, receiver_id, "credit raced with another write, retrying");
                    continue;
                }
                Err(e) => {
                    self.compensate(sender_id, amount).await;
                    error!(error = %e, receiver_id, "credit write failed");
                    return Err(Error::Internal);
                }
            }

            let tx = Transaction::transfer(sender_id, receiver_id, amount, note.clone());
            let tx_id = tx.id;
            if let Err(e) = self.store.append_transaction(tx).await {
                // reverse both legs so balances match the ledger
                self.compensate(sender_id, amount).await;
                self.compensate(receiver_id, -amount).await;
                error!(error = %e, "ledger append failed");
                return Err(Error::Internal);
            }

            return Ok(TransferReceipt {
                transaction_id: tx_id,
                new_balance: debited,
            });
        }

        error!(sender_id, "transfer contention unresolved after retries");
        Err(Error::Internal)
    }

    /// Pay a bill: a one-sided debit. The money leaves the tracked-account
    /// universe, so there is no credit leg.
    pub async fn bill_pay(
        &self,
        sender_id: &str,
        amount: f64,
        note: String,
    ) -> Result<TransferReceipt> {
        let amount = validate_amount(amount)?;

        for attempt in 0..ledger::MAX_CAS_RETRIES {
            let sender = self
                .load(sender_id)
                .await?
                .ok_or(Error::AccountNotFound)?;

            if sender.balance < amount {
                return Err(Error::InsufficientFunds {
                    balance: sender.balance,
                    requested: amount,
                });
            }

            let debited = round2(sender.balance - amount);
            match self
                .store
                .apply_balance(sender_id, sender.version, debited)
                .await
            {
                Ok(()) => {}
                Err(StoreError::VersionConflict(_)) => {
                    warn!(attempt, sender_id, "debit raced with another write, retrying");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, sender_id, "debit write failed");
                    return Err(Error::Internal);
                }
            }

            let tx = Transaction::bill_pay(sender_id, amount, note.clone());
            let tx_id = tx.id;
            if let Err(e) = self.store.append_transaction(tx).await {
                self.compensate(sender_id, amount).await;
                error!(error = %e, "ledger append failed");
                return Err(Error::Internal);
            }

            return Ok(TransferReceipt {
                transaction_id: tx_id,
                new_balance: debited,
            });
        }

        error!(sender_id, "bill payment contention unresolved after retries");
        Err(Error::Internal)
    }

    pub async fn balance(&self, user_id: &str) -> Result<f64> {
        let account = self.load(user_id).await?.ok_or(Error::AccountNotFound)?;
        Ok(account.balance)
    }

    /// Transaction history for the user, newest first. `limit` defaults and
    /// is capped by configuration.
    pub async fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        self.load(user_id).await?.ok_or(Error::AccountNotFound)?;

        let limit = limit.unwrap_or(history::DEFAULT_LIMIT).min(history::MAX_LIMIT);
        self.store
            .transactions_for(user_id, limit, kind)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "history read failed");
                Error::Internal
            })
    }

    async fn load(&self, id: &str) -> Result<Option<Account>> {
        self.store.get(id).await.map_err(|e| {
            error!(error = %e, id, "account load failed");
            Error::Internal
        })
    }

    /// Balance adjustment used to undo a landed leg. Retries through
    /// version conflicts and reports whether the undo landed; a `false`
    /// return means the account is unbalanced and the caller must abort
    /// rather than attempt the operation again.
    async fn compensate(&self, id: &str, delta: f64) -> bool {
        for _ in 0..ledger::MAX_CAS_RETRIES {
            let account = match self.store.get(id).await {
                Ok(Some(a)) => a,
                Ok(None) | Err(_) => break,
            };
            match self
                .store
                .apply_balance(id, account.version, round2(account.balance + delta))
                .await
            {
                Ok(()) => return true,
                Err(StoreError::VersionConflict(_)) => continue,
                Err(_) => break,
            }
        }
        error!(account = id, delta, "compensation failed, balance needs reconciliation");
        false
    }
}
