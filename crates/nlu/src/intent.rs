//! Keyword-driven intent classification
//!
//! Classification walks [`PRIORITY_TABLE`] top to bottom and the first row
//! with a matching keyword wins. The row order is the tie-break policy:
//! text containing both a transfer and a balance keyword resolves to
//! transfer. Transfer, balance, and bill rows match by substring
//! containment; confirm and cancel match whole words only, so short tokens
//! like "ok" or "no" cannot fire inside longer words.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// The caller's inferred purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Transfer,
    Balance,
    BillPay,
    Confirm,
    Cancel,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Balance => "balance",
            Self::BillPay => "billpay",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a row's keywords are matched against the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Plain substring containment.
    Substring,
    /// Whole-word (or whole-phrase) match on unicode word boundaries.
    WholeWord,
}

/// One row of the classification priority table.
pub struct PriorityRow {
    pub intent: IntentKind,
    pub keywords: &'static [&'static str],
    pub rule: MatchRule,
    pub confidence: f32,
}

/// The classification policy, in evaluation order. Keywords are matched
/// against normalized text, so code-mixed variants (bhejo, bijli, ...) are
/// already translated by the time they get here.
pub const PRIORITY_TABLE: &[PriorityRow] = &[
    PriorityRow {
        intent: IntentKind::Transfer,
        keywords: &["send", "transfer", "pay", "give"],
        rule: MatchRule::Substring,
        confidence: 0.95,
    },
    PriorityRow {
        intent: IntentKind::Balance,
        keywords: &["balance", "how much", "what is", "check", "show", "tell", "account"],
        rule: MatchRule::Substring,
        confidence: 0.95,
    },
    PriorityRow {
        intent: IntentKind::BillPay,
        keywords: &["bill", "recharge", "electricity", "water", "mobile", "internet", "gas"],
        rule: MatchRule::Substring,
        confidence: 0.90,
    },
    PriorityRow {
        intent: IntentKind::Confirm,
        keywords: &["confirm", "yes", "haan", "ok", "okay", "theek hai", "proceed"],
        rule: MatchRule::WholeWord,
        confidence: 0.90,
    },
    PriorityRow {
        intent: IntentKind::Cancel,
        keywords: &["cancel", "no", "nahi", "stop", "ruko", "mat karo"],
        rule: MatchRule::WholeWord,
        confidence: 0.90,
    },
];

/// Classify normalized text. No match yields `(Unknown, 0.0)`.
pub fn classify(normalized: &str) -> (IntentKind, f32) {
    for row in PRIORITY_TABLE {
        let hit = match row.rule {
            MatchRule::Substring => row.keywords.iter().any(|kw| normalized.contains(kw)),
            MatchRule::WholeWord => row
                .keywords
                .iter()
                .any(|kw| contains_whole_phrase(normalized, kw)),
        };
        if hit {
            return (row.intent, row.confidence);
        }
    }
    (IntentKind::Unknown, 0.0)
}

/// Whole-word containment on unicode word boundaries. Handles multi-word
/// keywords ("theek hai") and strips punctuation, so "yes, confirm" matches
/// "yes" but "okay" never fires on "tokayo".
fn contains_whole_phrase(text: &str, phrase: &str) -> bool {
    let padded = format!(" {} ", text.unicode_words().collect::<Vec<_>>().join(" "));
    padded.contains(&format!(" {} ", phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_detection() {
        let (intent, confidence) = classify("send 200 to ramesh");
        assert_eq!(intent, IntentKind::Transfer);
        assert!(confidence > 0.9);
    }

    #[test]
    fn test_balance_detection() {
        let (intent, confidence) = classify("what is my balance");
        assert_eq!(intent, IntentKind::Balance);
        assert!(confidence > 0.9);

        // a bare "account" mention reads as a balance enquiry
        assert_eq!(classify("account").0, IntentKind::Balance);
        assert_eq!(classify("my account details").0, IntentKind::Balance);
    }

    #[test]
    fn test_billpay_detection() {
        let (intent, _) = classify("electricity bill 500 for 9876501234");
        assert_eq!(intent, IntentKind::BillPay);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("xyz unrelated text"), (IntentKind::Unknown, 0.0));
    }

    #[test]
    fn test_transfer_beats_balance() {
        // Tie-break: both keyword sets present, transfer row is evaluated first.
        let (intent, _) = classify("send my balance to ramesh");
        assert_eq!(intent, IntentKind::Transfer);
    }

    #[test]
    fn test_confirm_whole_word_only() {
        assert_eq!(classify("ok").0, IntentKind::Confirm);
        assert_eq!(classify("yes, go ahead").0, IntentKind::Confirm);
        // "ok" inside a longer token must not fire
        assert_eq!(classify("broker fees").0, IntentKind::Unknown);
        assert_eq!(classify("tokaimachi").0, IntentKind::Unknown);
    }

    #[test]
    fn test_cancel_phrases() {
        assert_eq!(classify("nahi ruko").0, IntentKind::Cancel);
        assert_eq!(classify("mat karo").0, IntentKind::Cancel);
        // "no" must not fire inside "note"
        assert_eq!(classify("note").0, IntentKind::Unknown);
    }
}
