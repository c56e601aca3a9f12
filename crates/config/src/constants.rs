//! Centralized constants for the voice banking pipeline
//!
//! Single source of truth for business numbers. Code never hardcodes these
//! values; settings default to them and callers read through `Settings`.

/// Fraud / risk limits
pub mod limits {
    /// Fixed per-transaction ceiling (INR), applied identically to
    /// transfers and bill payments.
    pub const MAX_TRANSACTION_AMOUNT: f64 = 2000.0;
}

/// Account provisioning defaults
pub mod accounts {
    /// Balance granted when an account is auto-provisioned on first
    /// authenticated contact.
    pub const OPENING_BALANCE: f64 = 1000.0;

    /// ISO currency code for all balances and amounts.
    pub const CURRENCY: &str = "INR";
}

/// Transaction history paging
pub mod history {
    /// Limit applied when the caller does not specify one.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Hard cap on a single history page.
    pub const MAX_LIMIT: usize = 100;
}

/// Ledger engine tuning
pub mod ledger {
    /// Attempts before a version-conflicted balance write gives up.
    pub const MAX_CAS_RETRIES: u32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_positive() {
        assert!(limits::MAX_TRANSACTION_AMOUNT > 0.0);
        assert!(accounts::OPENING_BALANCE >= 0.0);
    }

    #[test]
    fn test_history_caps_ordered() {
        assert!(history::DEFAULT_LIMIT <= history::MAX_LIMIT);
    }
}
