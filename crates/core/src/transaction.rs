//! Append-only ledger records and bill categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer,
    BillPay,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::BillPay => "billpay",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "transfer" => Some(Self::Transfer),
            "billpay" => Some(Self::BillPay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// A completed ledger entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub sender_id: String,
    /// None for bill payments: money leaves the tracked-account universe.
    pub receiver_id: Option<String>,
    pub amount: f64,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn transfer(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        amount: f64,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: sender_id.into(),
            receiver_id: Some(receiver_id.into()),
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::Success,
            note,
            created_at: Utc::now(),
        }
    }

    pub fn bill_pay(sender_id: impl Into<String>, amount: f64, note: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: sender_id.into(),
            receiver_id: None,
            amount,
            kind: TransactionKind::BillPay,
            status: TransactionStatus::Success,
            note: Some(note),
            created_at: Utc::now(),
        }
    }

    /// Whether this entry belongs to the given user's history.
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id.as_deref() == Some(user_id)
    }
}

/// Supported utility bill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillCategory {
    Electricity,
    Water,
    Mobile,
    Internet,
    Gas,
}

impl BillCategory {
    pub const ALL: [BillCategory; 5] = [
        Self::Electricity,
        Self::Water,
        Self::Mobile,
        Self::Internet,
        Self::Gas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Water => "water",
            Self::Mobile => "mobile",
            Self::Internet => "internet",
            Self::Gas => "gas",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "electricity" => Some(Self::Electricity),
            "water" => Some(Self::Water),
            "mobile" => Some(Self::Mobile),
            "internet" => Some(Self::Internet),
            "gas" => Some(Self::Gas),
            _ => None,
        }
    }
}

impl std::fmt::Display for BillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BillCategory {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::Error::UnknownCategory(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            TransactionKind::parse("transfer"),
            Some(TransactionKind::Transfer)
        );
        assert_eq!(TransactionKind::BillPay.as_str(), "billpay");
        assert_eq!(TransactionKind::parse("loan"), None);
    }

    #[test]
    fn test_bill_pay_has_no_receiver() {
        let tx = Transaction::bill_pay("user-1", 500.0, "electricity bill".into());
        assert!(tx.receiver_id.is_none());
        assert_eq!(tx.kind, TransactionKind::BillPay);
        assert_eq!(tx.status, TransactionStatus::Success);
    }

    #[test]
    fn test_involves() {
        let tx = Transaction::transfer("a", "b", 10.0, None);
        assert!(tx.involves("a"));
        assert!(tx.involves("b"));
        assert!(!tx.involves("c"));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(BillCategory::parse("Electricity"), Some(BillCategory::Electricity));
        assert_eq!(BillCategory::parse(" gas "), Some(BillCategory::Gas));
        assert_eq!(BillCategory::parse("cable"), None);
    }

    #[test]
    fn test_category_from_str_reports_unknown() {
        assert_eq!("water".parse::<BillCategory>().unwrap(), BillCategory::Water);

        let err = "cable".parse::<BillCategory>().unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_CATEGORY");
        assert!(err.to_string().contains("cable"));
    }
}
