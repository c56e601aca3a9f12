//! Account entity and credential purposes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a PIN protects: signing in, or moving money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPurpose {
    Login,
    Transfer,
}

impl CredentialPurpose {
    /// Exact digit count required for this purpose.
    pub fn pin_length(&self) -> usize {
        match self {
            Self::Login => 6,
            Self::Transfer => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for CredentialPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer account.
///
/// `balance` is never negative at any observable point; only the ledger
/// engine mutates it. `version` is the optimistic-concurrency token bumped
/// on every balance write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub balance: f64,
    pub login_pin_hash: Option<String>,
    pub transfer_pin_hash: Option<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        opening_balance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            balance: opening_balance,
            login_pin_hash: None,
            transfer_pin_hash: None,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Stored hash for the given purpose, if one has been set.
    pub fn credential_hash(&self, purpose: CredentialPurpose) -> Option<&str> {
        match purpose {
            CredentialPurpose::Login => self.login_pin_hash.as_deref(),
            CredentialPurpose::Transfer => self.transfer_pin_hash.as_deref(),
        }
    }
}

/// Account view safe to return to callers: credential hashes stripped.
#[derive(Debug, Clone, Serialize)]
pub struct AccountProfile {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            phone: account.phone.clone(),
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_lengths() {
        assert_eq!(CredentialPurpose::Login.pin_length(), 6);
        assert_eq!(CredentialPurpose::Transfer.pin_length(), 4);
    }

    #[test]
    fn test_new_account() {
        let account = Account::new("user-1", "Ramesh", "9876543210", 1000.0);
        assert_eq!(account.balance, 1000.0);
        assert_eq!(account.version, 0);
        assert!(account.login_pin_hash.is_none());
        assert!(account.transfer_pin_hash.is_none());
    }

    #[test]
    fn test_profile_strips_hashes() {
        let mut account = Account::new("user-1", "Ramesh", "9876543210", 1000.0);
        account.login_pin_hash = Some("abc".into());
        account.transfer_pin_hash = Some("def".into());

        let json = serde_json::to_string(&AccountProfile::from(&account)).unwrap();
        assert!(!json.contains("abc"));
        assert!(!json.contains("pin"));
    }
}
