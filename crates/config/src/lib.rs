//! Configuration for the voice banking pipeline
//!
//! Business constants live in [`constants`]; runtime-tunable values load
//! through [`Settings`] from an optional TOML file plus environment
//! overrides.

pub mod constants;
mod settings;

pub use settings::{AccountConfig, HistoryConfig, RiskConfig, Settings};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
