//! Settings update error types
use thiserror::Error;

use crate::service::ServiceError;
use crate::validation::ValidationError;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Why a settings update did not go through
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings update: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to persist settings: {0}")]
    RemoteUpdate(#[from] ServiceError),

    #[error("Failed to serialize settings: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown settings action: {0}")]
    UnknownAction(String),
}

impl SettingsError {
    /// Rejected locally, before any request was made
    pub fn is_validation_error(&self) -> bool {
        matches!(self, SettingsError::Validation(_))
    }

    /// The backend call failed
    pub fn is_remote_error(&self) -> bool {
        matches!(self, SettingsError::RemoteUpdate(_))
    }
}
