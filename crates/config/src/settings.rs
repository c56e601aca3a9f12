//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{accounts, history, limits};
use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Per-transaction risk limits
    #[serde(default)]
    pub risk: RiskConfig,

    /// Account provisioning
    #[serde(default)]
    pub accounts: AccountConfig,

    /// Transaction history paging
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Risk limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Fixed per-transaction amount ceiling (INR)
    #[serde(default = "default_max_transaction_amount")]
    pub max_transaction_amount: f64,
}

fn default_max_transaction_amount() -> f64 {
    limits::MAX_TRANSACTION_AMOUNT
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_transaction_amount: default_max_transaction_amount(),
        }
    }
}

/// Account provisioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Balance granted to auto-provisioned accounts
    #[serde(default = "default_opening_balance")]
    pub opening_balance: f64,

    /// Currency code reported with balances
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_opening_balance() -> f64 {
    accounts::OPENING_BALANCE
}

fn default_currency() -> String {
    accounts::CURRENCY.to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            opening_balance: default_opening_balance(),
            currency: default_currency(),
        }
    }
}

/// Transaction history paging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_limit")]
    pub default_limit: usize,

    #[serde(default = "default_history_max")]
    pub max_limit: usize,
}

fn default_history_limit() -> usize {
    history::DEFAULT_LIMIT
}

fn default_history_max() -> usize {
    history::MAX_LIMIT
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_history_limit(),
            max_limit: default_history_max(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file plus `VOICE_BANKING_*`
    /// environment overrides (e.g. `VOICE_BANKING_RISK__MAX_TRANSACTION_AMOUNT`).
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("VOICE_BANKING")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Sanity-check loaded values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.risk.max_transaction_amount <= 0.0 {
            return Err(ConfigError::Invalid(
                "risk.max_transaction_amount must be positive".into(),
            ));
        }
        if self.accounts.opening_balance < 0.0 {
            return Err(ConfigError::Invalid(
                "accounts.opening_balance cannot be negative".into(),
            ));
        }
        if self.history.default_limit > self.history.max_limit {
            return Err(ConfigError::Invalid(
                "history.default_limit cannot exceed history.max_limit".into(),
            ));
        }
        Ok(())
    }
}
