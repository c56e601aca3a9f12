//! Per-transaction risk limits

use voice_banking_config::constants::limits;
use voice_banking_core::{Error, Result};

/// Fixed per-transaction amount ceiling, applied to every debit before any
/// credential check or balance read. An amount exactly at the ceiling is
/// allowed; only strictly greater is rejected.
#[derive(Debug, Clone, Copy)]
pub struct RiskPolicy {
    max_amount: f64,
}

impl RiskPolicy {
    pub fn new(max_amount: f64) -> Self {
        Self { max_amount }
    }

    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    pub fn check(&self, amount: f64) -> Result<()> {
        if amount > self.max_amount {
            return Err(Error::LimitExceeded {
                amount,
                limit: self.max_amount,
            });
        }
        Ok(())
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self::new(limits::MAX_TRANSACTION_AMOUNT)
    }
}
