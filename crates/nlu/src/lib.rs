//! Rule-based language understanding for voice banking commands
//!
//! The pipeline is deterministic and dependency-free at runtime: normalize
//! code-mixed text, classify intent against an ordered keyword table, then
//! extract typed entities with compiled regex patterns. Identical input
//! always produces identical output.

pub mod entities;
pub mod intent;
pub mod normalize;

pub use entities::{
    extract_account_number, extract_amount, extract_bill_category, extract_pin,
    extract_receiver, Receiver,
};
pub use intent::{classify, IntentKind, MatchRule, PriorityRow, PRIORITY_TABLE};
pub use normalize::{normalize, CODE_MIXED_VOCABULARY};
