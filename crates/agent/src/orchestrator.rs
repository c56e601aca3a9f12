//! Dialog interpretation
//!
//! A single turn goes normalize, classify, extract, then through the gating
//! state machine. The design is memoryless: nothing about a previous turn
//! is remembered server-side, so every money-moving turn must carry the
//! full operation (amount, counterparty, PIN). A turn that only confirms
//! gets asked to restate the whole instruction.

use serde::Serialize;
use tracing::debug;

use voice_banking_core::BillCategory;
use voice_banking_nlu::{
    classify, extract_account_number, extract_amount, extract_bill_category, extract_pin,
    extract_receiver, normalize, IntentKind, Receiver,
};

/// Where a turn landed after interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// Required entities are missing; nothing will be executed.
    NeedsInfo,
    /// Operation is complete but unauthorized; a PIN is required.
    PendingConfirmation,
    /// Operation is complete and carries a credential; safe to hand to the
    /// service layer.
    ReadyToExecute,
    /// The caller backed out. Terminal, no action.
    Cancelled,
    /// No intent matched.
    Unrecognized,
}

/// Strongly-typed command payloads, one variant per intent kind. Fields are
/// optional because extraction can come up empty; [`DialogState`] says
/// whether the set is complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ParsedCommand {
    Transfer(TransferDraft),
    Balance,
    BillPay(BillPayDraft),
    Confirm { pin: Option<String> },
    Cancel,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferDraft {
    pub amount: Option<f64>,
    pub receiver: Option<Receiver>,
    pub pin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillPayDraft {
    pub amount: Option<f64>,
    pub category: Option<BillCategory>,
    pub account_number: Option<String>,
    pub pin: Option<String>,
}

/// Everything a caller learns from one turn.
#[derive(Debug, Clone, Serialize)]
pub struct IntentResult {
    pub intent: IntentKind,
    pub confidence: f32,
    #[serde(flatten)]
    pub command: ParsedCommand,
    pub missing: Vec<&'static str>,
    pub state: DialogState,
    pub prompt: Option<String>,
}

/// Stateless turn interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogOrchestrator;

impl DialogOrchestrator {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, text: &str) -> IntentResult {
        let normalized = normalize(text);
        let (intent, confidence) = classify(&normalized);
        debug!(%intent, confidence, "classified turn");

        match intent {
            IntentKind::Transfer => self.interpret_transfer(&normalized, intent, confidence),
            IntentKind::Balance => IntentResult {
                intent,
                confidence,
                command: ParsedCommand::Balance,
                missing: vec![],
                state: DialogState::ReadyToExecute,
                prompt: None,
            },
            IntentKind::BillPay => self.interpret_bill_pay(&normalized, intent, confidence),
            IntentKind::Confirm => IntentResult {
                intent,
                confidence,
                command: ParsedCommand::Confirm {
                    pin: extract_pin(&normalized),
                },
                missing: vec!["operation"],
                state: DialogState::NeedsInfo,
                prompt: Some(
                    "Please repeat the full instruction together with your PIN, \
                     for example 'send 500 to ramesh pin 1234'."
                        .into(),
                ),
            },
            IntentKind::Cancel => IntentResult {
                intent,
                confidence,
                command: ParsedCommand::Cancel,
                missing: vec![],
                state: DialogState::Cancelled,
                prompt: Some("Okay, cancelled. No money has been moved.".into()),
            },
            IntentKind::Unknown => IntentResult {
                intent,
                confidence,
                command: ParsedCommand::Unknown,
                missing: vec![],
                state: DialogState::Unrecognized,
                prompt: Some(
                    "Sorry, I did not understand. You can check your balance, \
                     send money, or pay a bill."
                        .into(),
                ),
            },
        }
    }

    fn interpret_transfer(&self, normalized: &str, intent: IntentKind, confidence: f32) -> IntentResult {
        let amount = extract_amount(normalized);
        let receiver = extract_receiver(normalized);
        let pin = guarded_pin(normalized, amount);

        let mut missing = Vec::new();
        if amount.is_none() {
            missing.push("amount");
        }
        if receiver.is_none() {
            missing.push("receiver");
        }

        let (state, prompt) = if !missing.is_empty() {
            (
                DialogState::NeedsInfo,
                Some(format!("Please provide: {}", missing.join(", "))),
            )
        } else if pin.is_none() {
            let prompt = format!(
                "You are about to transfer \u{20b9}{:.2} to {}. \
                 Say your 4-digit transfer PIN to confirm.",
                amount.unwrap_or_default(),
                receiver.as_ref().map(Receiver::display).unwrap_or_default(),
            );
            (DialogState::PendingConfirmation, Some(prompt))
        } else {
            (DialogState::ReadyToExecute, None)
        };

        IntentResult {
            intent,
            confidence,
            command: ParsedCommand::Transfer(TransferDraft {
                amount,
                receiver,
                pin,
            }),
            missing,
            state,
            prompt,
        }
    }

    fn interpret_bill_pay(&self, normalized: &str, intent: IntentKind, confidence: f32) -> IntentResult {
        let amount = extract_amount(normalized);
        let category = extract_bill_category(normalized);
        let account_number = extract_account_number(normalized);
        let pin = guarded_pin(normalized, amount);

        let mut missing = Vec::new();
        if amount.is_none() {
            missing.push("amount");
        }
        if category.is_none() {
            missing.push("category");
        }
        if account_number.is_none() {
            missing.push("account_number");
        }

        let (state, prompt) = if !missing.is_empty() {
            (
                DialogState::NeedsInfo,
                Some(format!("Please provide: {}", missing.join(", "))),
            )
        } else if pin.is_none() {
            let prompt = format!(
                "You are about to pay \u{20b9}{:.2} for the {} bill on account {}. \
                 Say your 4-digit transfer PIN to confirm.",
                amount.unwrap_or_default(),
                category.map(|c| c.as_str()).unwrap_or_default(),
                account_number.as_deref().unwrap_or_default(),
            );
            (DialogState::PendingConfirmation, Some(prompt))
        } else {
            (DialogState::ReadyToExecute, None)
        };

        IntentResult {
            intent,
            confidence,
            command: ParsedCommand::BillPay(BillPayDraft {
                amount,
                category,
                account_number,
                pin,
            }),
            missing,
            state,
            prompt,
        }
    }
}

/// PIN extraction with an echo guard: a candidate that merely repeats the
/// amount digits is discarded unless the turn actually says "pin", so
/// "send 2000 to ramesh" cannot self-confirm with its own amount.
fn guarded_pin(normalized: &str, amount: Option<f64>) -> Option<String> {
    let pin = extract_pin(normalized)?;
    if !normalized.contains("pin") {
        if let Some(digits) = amount.and_then(whole_digits) {
            if digits == pin {
                return None;
            }
        }
    }
    Some(pin)
}

fn whole_digits(amount: f64) -> Option<String> {
    if amount >= 0.0 && amount.fract() == 0.0 {
        Some(format!("{}", amount as u64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> IntentResult {
        DialogOrchestrator::new().interpret(text)
    }

    #[test]
    fn test_balance_executes_directly() {
        let result = interpret("what is my balance");
        assert_eq!(result.intent, IntentKind::Balance);
        assert_eq!(result.state, DialogState::ReadyToExecute);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_transfer_missing_entities() {
        let result = interpret("send money");
        assert_eq!(result.state, DialogState::NeedsInfo);
        assert_eq!(result.missing, vec!["amount", "receiver"]);
        assert!(result.prompt.unwrap().contains("amount"));
    }

    #[test]
    fn test_transfer_without_pin_is_pending() {
        let result = interpret("send 200 to ramesh");
        assert_eq!(result.state, DialogState::PendingConfirmation);
        let prompt = result.prompt.unwrap();
        // the pending message restates amount and counterparty
        assert!(prompt.contains("200.00"));
        assert!(prompt.contains("9876543210"));
    }

    #[test]
    fn test_transfer_with_pin_is_ready() {
        let result = interpret("send 200 to ramesh pin 4321");
        assert_eq!(result.state, DialogState::ReadyToExecute);
        match result.command {
            ParsedCommand::Transfer(draft) => {
                assert_eq!(draft.amount, Some(200.0));
                assert_eq!(draft.receiver, Some(Receiver::Phone("9876543210".into())));
                assert_eq!(draft.pin.as_deref(), Some("4321"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_amount_cannot_act_as_its_own_pin() {
        // "2000" qualifies as a 4-digit run, but without the word "pin" it
        // is just the amount being echoed
        let result = interpret("send 2000 to ramesh");
        assert_eq!(result.state, DialogState::PendingConfirmation);

        let result = interpret("send 2000 to ramesh pin 2000");
        assert_eq!(result.state, DialogState::ReadyToExecute);
    }

    #[test]
    fn test_hinglish_transfer_turn() {
        let result = interpret("Ramesh ko 200 bhejo");
        assert_eq!(result.intent, IntentKind::Transfer);
        assert_eq!(result.state, DialogState::PendingConfirmation);
    }

    #[test]
    fn test_pay_keyword_wins_priority_race() {
        // "pay" sits in the transfer keyword row, which is checked first,
        // so this turn asks for a receiver instead of running as a bill
        let result = interpret("pay electricity bill 500 for 9876501234");
        assert_eq!(result.intent, IntentKind::Transfer);
        assert_eq!(result.state, DialogState::NeedsInfo);
        assert_eq!(result.missing, vec!["receiver"]);
    }

    #[test]
    fn test_bill_pay_full_turn() {
        let result = interpret("electricity bill 500 for 9876501234");
        assert_eq!(result.intent, IntentKind::BillPay);
        assert_eq!(result.state, DialogState::PendingConfirmation);
        let prompt = result.prompt.unwrap();
        assert!(prompt.contains("500.00"));
        assert!(prompt.contains("electricity"));
        assert!(prompt.contains("9876501234"));
    }

    #[test]
    fn test_bill_pay_missing_account_number() {
        let result = interpret("bijli bill 500");
        assert_eq!(result.intent, IntentKind::BillPay);
        assert_eq!(result.state, DialogState::NeedsInfo);
        assert_eq!(result.missing, vec!["account_number"]);
    }

    #[test]
    fn test_confirm_requires_resubmission() {
        let result = interpret("yes confirm pin 4321");
        assert_eq!(result.intent, IntentKind::Confirm);
        assert_eq!(result.state, DialogState::NeedsInfo);
        match result.command {
            ParsedCommand::Confirm { pin } => assert_eq!(pin.as_deref(), Some("4321")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cancel_is_terminal() {
        let result = interpret("nahi, cancel");
        assert_eq!(result.state, DialogState::Cancelled);
    }

    #[test]
    fn test_unknown_gives_guidance() {
        let result = interpret("xyz unrelated text");
        assert_eq!(result.intent, IntentKind::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.state, DialogState::Unrecognized);
        assert!(result.prompt.is_some());
    }
}
