//! Entity extraction from normalized command text
//!
//! Each extractor is an independent function over already-normalized text.
//! Extractors return `None` rather than erroring: the dialog layer decides
//! which entities a given intent actually requires.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use voice_banking_core::BillCategory;

/// First standalone number of up to 8 digits with an optional 2-decimal
/// fraction. Word boundaries keep it from matching inside a 10-digit phone
/// number.
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,8}(?:\.\d{1,2})?)\b").unwrap());

/// "to <token>" / "ko <token>", token either a word or a full phone number.
static RECEIVER_AFTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:to|ko)\s+([a-z]+|\d{10})\b").unwrap());

/// Hindi postposition form: "<name> ko".
static RECEIVER_BEFORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-z]+)\s+ko\b").unwrap());

static ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{10})\b").unwrap());

/// Demo contact book. Known names resolve directly to their canonical
/// phone number; anything else is passed through for downstream resolution.
const RECEIVER_ALIASES: &[(&str, &str)] = &[
    ("ramesh", "9876543210"),
    ("suresh", "9876501234"),
    ("priya", "9123456780"),
    ("sharma", "8888888888"),
];

/// A receiver reference pulled out of the command text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Receiver {
    /// Resolved phone number, usable as an account lookup key.
    Phone(String),
    /// Unresolved display name. The service layer resolves or rejects it.
    Name(String),
}

impl Receiver {
    pub fn display(&self) -> &str {
        match self {
            Self::Phone(p) => p,
            Self::Name(n) => n,
        }
    }
}

/// Extract a monetary amount. Returns the raw parsed value; range and
/// precision checks happen in the core validation layer.
pub fn extract_amount(text: &str) -> Option<f64> {
    AMOUNT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extract the transfer receiver. Tries "to/ko <token>" first, then the
/// postposition form "<name> ko". Aliases and bare 10-digit tokens become
/// phone numbers.
pub fn extract_receiver(text: &str) -> Option<Receiver> {
    let token = RECEIVER_AFTER_RE
        .captures(text)
        .or_else(|| RECEIVER_BEFORE_RE.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())?;

    if token.len() == 10 && token.chars().all(|c| c.is_ascii_digit()) {
        return Some(Receiver::Phone(token));
    }
    for (alias, phone) in RECEIVER_ALIASES {
        if token == *alias {
            return Some(Receiver::Phone((*phone).to_string()));
        }
    }
    Some(Receiver::Name(token))
}

/// Per-category keyword table, checked in order. First hit wins, so
/// "electricity recharge" resolves to electricity rather than mobile.
const BILL_KEYWORDS: &[(BillCategory, &[&str])] = &[
    (BillCategory::Electricity, &["electricity", "power", "electric"]),
    (BillCategory::Water, &["water", "jal"]),
    (BillCategory::Mobile, &["mobile", "phone", "recharge"]),
    (BillCategory::Internet, &["internet", "wifi", "broadband"]),
    (BillCategory::Gas, &["gas", "lpg"]),
];

pub fn extract_bill_category(text: &str) -> Option<BillCategory> {
    for (category, keywords) in BILL_KEYWORDS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return Some(*category);
        }
    }
    None
}

/// Extract a 10-digit account or consumer number.
pub fn extract_account_number(text: &str) -> Option<String> {
    ACCOUNT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract a spoken PIN: a run of 4 to 6 digits, possibly dictated one
/// digit at a time ("1 2 3 4"). Consecutive all-digit tokens form one run;
/// a run totalling 10 digits is a phone number, never a PIN. A run
/// introduced by a "pin" keyword wins over the positional fallback (the
/// last qualifying run), so a trailing dictated PIN beats a leading amount.
pub fn extract_pin(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut candidates: Vec<(usize, String)> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].chars().all(|c| c.is_ascii_digit()) {
            let start = i;
            let mut digits = String::new();
            while i < tokens.len() && tokens[i].chars().all(|c| c.is_ascii_digit()) {
                digits.push_str(tokens[i]);
                i += 1;
            }
            if (4..=6).contains(&digits.len()) {
                candidates.push((start, digits));
            }
        } else {
            i += 1;
        }
    }

    if let Some((_, digits)) = candidates.iter().find(|(start, _)| {
        tokens[start.saturating_sub(3)..*start]
            .iter()
            .any(|t| t.contains("pin"))
    }) {
        return Some(digits.clone());
    }
    candidates.pop().map(|(_, digits)| digits)
}
