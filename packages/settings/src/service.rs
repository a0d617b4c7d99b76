// ABOUTME: Remote settings service contract
// ABOUTME: Request envelope, service errors and the trait the updater persists through

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::types::FrontendSettings;

/// Remote service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Settings rejected by backend: {0}")]
    Rejected(String),

    #[error("Unauthorized: no user is logged in")]
    Unauthorized,

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, ServiceError::Network(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Body of a "set settings" call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsUpdateRequest {
    /// Serialized snapshot of every frontend setting
    pub frontend_settings: String,
}

impl SettingsUpdateRequest {
    pub fn from_settings(settings: &FrontendSettings) -> serde_json::Result<Self> {
        Ok(Self {
            frontend_settings: settings.to_blob()?,
        })
    }
}

/// Backend that persists the frontend settings blob
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Persist the settings; the success value is whatever the backend returns
    async fn set_settings(
        &self,
        request: SettingsUpdateRequest,
    ) -> ServiceResult<serde_json::Value>;
}
