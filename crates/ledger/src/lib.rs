//! Account ledger: storage seam, atomic money movement, risk limits, and
//! credential gating
//!
//! The crate is organized around one injected trait, [`AccountStore`]. The
//! [`LedgerEngine`] owns every balance mutation, [`RiskPolicy`] enforces the
//! per-transaction ceiling, and [`AuthGate`] keeps credentials hashed and
//! checked before money moves.

pub mod auth;
pub mod engine;
pub mod risk;
pub mod store;

pub use auth::{hash_pin, AuthGate};
pub use engine::{LedgerEngine, TransferReceipt};
pub use risk::RiskPolicy;
pub use store::{AccountStore, MemoryAccountStore, StoreError, StoreResult};
