//! Error taxonomy for the voice banking pipeline
//!
//! Every failure a caller can observe maps to one variant here, each with a
//! stable machine-readable code. Validation and policy failures are raised
//! before any lookup or mutation; storage failures surface as `Internal`
//! with no backend detail in the message.

use crate::account::CredentialPurpose;
use serde::Serialize;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// User-visible errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-range monetary amount, rejected before any lookup.
    #[error("invalid amount: {0}")]
    AmountInvalid(String),

    /// Bill category not in the supported set.
    #[error("unknown bill category '{0}'")]
    UnknownCategory(String),

    /// Credential of the wrong length or shape submitted to SetCredential.
    #[error("{purpose} PIN must be exactly {expected} digits")]
    InvalidLength {
        purpose: CredentialPurpose,
        expected: usize,
    },

    /// The caller's own account does not exist.
    #[error("account not found")]
    AccountNotFound,

    /// The transfer counterparty could not be resolved.
    #[error("no account found for receiver '{0}'")]
    ReceiverNotFound(String),

    /// Sender and receiver resolve to the same account.
    #[error("cannot transfer money to yourself")]
    SelfTransfer,

    /// Sender balance is smaller than the requested amount.
    #[error("insufficient funds: balance \u{20b9}{balance:.2}, requested \u{20b9}{requested:.2}")]
    InsufficientFunds { balance: f64, requested: f64 },

    /// Amount exceeds the fixed per-transaction ceiling.
    #[error("amount \u{20b9}{amount:.2} exceeds the per-transaction limit of \u{20b9}{limit:.2}")]
    LimitExceeded { amount: f64, limit: f64 },

    /// Submitted credential did not match the stored one.
    #[error("invalid {purpose} PIN")]
    InvalidCredential { purpose: CredentialPurpose },

    /// No credential of this purpose has been set up yet.
    #[error("{purpose} PIN has not been set up; set a PIN before this operation")]
    SetupRequired { purpose: CredentialPurpose },

    /// Unexpected failure in the storage collaborator. Detail goes to the
    /// log, never to the caller.
    #[error("an internal error occurred, please try again later")]
    Internal,
}

impl Error {
    /// Stable error code for the transport boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Error::AmountInvalid(_) => "AMOUNT_INVALID",
            Error::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Error::InvalidLength { .. } => "INVALID_LENGTH",
            Error::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Error::ReceiverNotFound(_) => "RECEIVER_NOT_FOUND",
            Error::SelfTransfer => "SELF_TRANSFER",
            Error::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Error::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            Error::InvalidCredential { .. } => "INVALID_CREDENTIAL",
            Error::SetupRequired { .. } => "SETUP_REQUIRED",
            Error::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Wire shape for failures: stable code plus human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
