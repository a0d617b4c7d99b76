// ABOUTME: HTTP implementation of the settings service against the Tally backend
// ABOUTME: Sends the settings envelope with PUT and maps backend responses to service errors

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tally_config::ServiceConfig;
use tracing::debug;

use crate::service::{ServiceError, ServiceResult, SettingsService, SettingsUpdateRequest};

const SETTINGS_PATH: &str = "api/1/settings";

#[derive(Debug, Serialize)]
struct SetSettingsBody<'a> {
    settings: &'a SettingsUpdateRequest,
}

/// Standard backend response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    message: String,
}

impl ApiResponse {
    fn into_result(self) -> ServiceResult<serde_json::Value> {
        match self.result {
            Some(result) => Ok(result),
            None if self.message.is_empty() => {
                Err(ServiceError::rejected("backend returned no result"))
            }
            None => Err(ServiceError::Rejected(self.message)),
        }
    }
}

/// Settings service backed by the Tally REST API
#[derive(Clone)]
pub struct HttpSettingsService {
    http_client: Client,
    settings_url: String,
}

impl HttpSettingsService {
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        let settings_url = format!(
            "{}/{}",
            config.api_url.as_str().trim_end_matches('/'),
            SETTINGS_PATH
        );

        Ok(Self {
            http_client,
            settings_url,
        })
    }

    pub fn settings_url(&self) -> &str {
        &self.settings_url
    }
}

#[async_trait]
impl SettingsService for HttpSettingsService {
    async fn set_settings(
        &self,
        request: SettingsUpdateRequest,
    ) -> ServiceResult<serde_json::Value> {
        debug!(url = %self.settings_url, "Sending settings to backend");

        let response = self
            .http_client
            .put(&self.settings_url)
            .json(&SetSettingsBody { settings: &request })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => response
                .json::<ApiResponse>()
                .await
                .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?
                .into_result(),
            StatusCode::UNAUTHORIZED => Err(ServiceError::Unauthorized),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
                Err(ServiceError::Rejected(error_message(response).await))
            }
            status => Err(ServiceError::Http {
                status: status.as_u16(),
                message: error_message(response).await,
            }),
        }
    }
}

/// Pull the backend's message out of an error response, falling back to the raw body
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) => message_from_body(status, text),
        Err(_) => status.to_string(),
    }
}

fn message_from_body(status: StatusCode, text: String) -> String {
    match serde_json::from_str::<ApiResponse>(&text) {
        Ok(envelope) if envelope.message.is_empty() => status.to_string(),
        Ok(envelope) => envelope.message,
        Err(_) if text.trim().is_empty() => status.to_string(),
        Err(_) => text,
    }
}
