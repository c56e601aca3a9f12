//! Core domain types for the voice banking pipeline
//!
//! This crate provides the types shared across all other crates:
//! - Account and credential purposes
//! - Transaction records and bill categories
//! - Monetary amount helpers
//! - Error taxonomy with stable codes

pub mod account;
pub mod error;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountProfile, CredentialPurpose};
pub use error::{Error, ErrorResponse, Result};
pub use money::{round2, validate_amount};
pub use transaction::{BillCategory, Transaction, TransactionKind, TransactionStatus};
