//! Credential storage and verification
//!
//! PINs are never stored or compared in the clear; only SHA-256 hex digests
//! reach the store. Verification semantics differ by purpose: a login check
//! against an account with no PIN simply fails, but a money movement
//! against an account with no transfer PIN is a setup error the caller must
//! resolve explicitly. Nothing here ever provisions a default PIN.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{error, info};

use voice_banking_core::{CredentialPurpose, Error, Result};

use crate::store::AccountStore;

/// Hex digest of a PIN.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// Validates, stores, and checks account credentials.
pub struct AuthGate {
    store: Arc<dyn AccountStore>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Set or replace the credential for a purpose. The PIN must be exactly
    /// the purpose's digit count, digits only.
    pub async fn set_credential(
        &self,
        user_id: &str,
        purpose: CredentialPurpose,
        pin: &str,
    ) -> Result<()> {
        let expected = purpose.pin_length();
        if pin.len() != expected || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidLength { purpose, expected });
        }

        self.store
            .set_credential_hash(user_id, purpose, hash_pin(pin))
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "credential write failed");
                Error::Internal
            })?;

        info!(user_id, purpose = %purpose, "credential updated");
        Ok(())
    }

    /// Check a submitted PIN against the stored digest.
    ///
    /// No stored login PIN means the check fails quietly; no stored
    /// transfer PIN means the account is not yet set up for money movement
    /// and the caller gets a setup error instead of a silent pass or fail.
    pub async fn verify(
        &self,
        user_id: &str,
        purpose: CredentialPurpose,
        pin: &str,
    ) -> Result<bool> {
        let account = self
            .store
            .get(user_id)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "account load failed");
                Error::Internal
            })?
            .ok_or(Error::AccountNotFound)?;

        match account.credential_hash(purpose) {
            Some(stored) => Ok(stored == hash_pin(pin)),
            None => match purpose {
                CredentialPurpose::Login => Ok(false),
                CredentialPurpose::Transfer => Err(Error::SetupRequired { purpose }),
            },
        }
    }

    /// [`verify`](Self::verify) that fails with `InvalidCredential` on a
    /// mismatch. Used on the money movement path.
    pub async fn require(
        &self,
        user_id: &str,
        purpose: CredentialPurpose,
        pin: &str,
    ) -> Result<()> {
        if self.verify(user_id, purpose, pin).await? {
            Ok(())
        } else {
            Err(Error::InvalidCredential { purpose })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAccountStore;
    use voice_banking_core::Account;

    async fn gate_with_account() -> AuthGate {
        let store = Arc::new(MemoryAccountStore::new());
        store
            .insert(Account::new("u1", "Ramesh", "9876543210", 1000.0))
            .await
            .unwrap();
        AuthGate::new(store)
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = hash_pin("1234");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, hash_pin("1234"));
        assert_ne!(digest, hash_pin("1235"));
    }

    #[tokio::test]
    async fn test_length_validation() {
        let gate = gate_with_account().await;

        let err = gate
            .set_credential("u1", CredentialPurpose::Transfer, "12345")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_LENGTH");

        let err = gate
            .set_credential("u1", CredentialPurpose::Login, "12ab56")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_LENGTH");

        assert!(gate
            .set_credential("u1", CredentialPurpose::Login, "123456")
            .await
            .is_ok());
        assert!(gate
            .set_credential("u1", CredentialPurpose::Transfer, "1234")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_verify_round_trip() {
        let gate = gate_with_account().await;
        gate.set_credential("u1", CredentialPurpose::Transfer, "4321")
            .await
            .unwrap();

        assert!(gate
            .verify("u1", CredentialPurpose::Transfer, "4321")
            .await
            .unwrap());
        assert!(!gate
            .verify("u1", CredentialPurpose::Transfer, "0000")
            .await
            .unwrap());

        let err = gate
            .require("u1", CredentialPurpose::Transfer, "0000")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_unset_credentials() {
        let gate = gate_with_account().await;

        // login with no stored PIN fails quietly
        assert!(!gate
            .verify("u1", CredentialPurpose::Login, "123456")
            .await
            .unwrap());

        // money movement with no stored PIN is a setup error
        let err = gate
            .verify("u1", CredentialPurpose::Transfer, "1234")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SETUP_REQUIRED");
    }
}
