//! Error types for the trial rewards core engine
//!
//! Reward resolution itself never fails. These errors only cover loading
//! configuration and using the cached engine before it was initialized.

use thiserror::Error;

/// Main error type for the trial rewards core engine
#[derive(Error, Debug)]
pub enum TrialRewardsError {
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Engine not initialized. Call init_engine() first.")]
    EngineNotInitialized,
}

impl From<serde_json::Error> for TrialRewardsError {
    fn from(err: serde_json::Error) -> Self {
        TrialRewardsError::DeserializationError(err.to_string())
    }
}

/// Result type alias for the trial rewards core engine
pub type Result<T> = std::result::Result<T, TrialRewardsError>;
