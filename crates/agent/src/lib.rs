//! Voice banking agent: dialog orchestration plus the service facade
//!
//! [`DialogOrchestrator`] turns free text into a gated, strongly-typed
//! command; [`BankingService`] routes complete commands through risk and
//! credential checks into the ledger.

pub mod orchestrator;
pub mod service;

pub use orchestrator::{
    BillPayDraft, DialogOrchestrator, DialogState, IntentResult, ParsedCommand, TransferDraft,
};
pub use service::{BalanceReport, BankingService, CommandOutcome};
