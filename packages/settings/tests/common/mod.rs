// ABOUTME: Shared test doubles for settings integration tests
// ABOUTME: mockall mocks of the remote service and state container plus a recording service

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use tally_settings::{
    FrontendSettings, ServiceError, ServiceResult, SettingsService, SettingsState,
    SettingsUpdateRequest,
};

mock! {
    pub SettingsService {}

    #[async_trait]
    impl SettingsService for SettingsService {
        async fn set_settings(&self, request: SettingsUpdateRequest) -> ServiceResult<serde_json::Value>;
    }
}

mock! {
    pub SettingsState {}

    #[async_trait]
    impl SettingsState for SettingsState {
        async fn snapshot(&self) -> FrontendSettings;
        async fn commit(&self, settings: FrontendSettings);
    }
}

/// Service double that records every request and answers from a fixed outcome
pub struct RecordingService {
    requests: Mutex<Vec<SettingsUpdateRequest>>,
    reject_with: Option<String>,
}

impl RecordingService {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reject_with: None,
        })
    }

    pub fn rejecting(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        })
    }

    pub fn requests(&self) -> Vec<SettingsUpdateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsService for RecordingService {
    async fn set_settings(
        &self,
        request: SettingsUpdateRequest,
    ) -> ServiceResult<serde_json::Value> {
        self.requests.lock().unwrap().push(request);
        match &self.reject_with {
            Some(message) => Err(ServiceError::rejected(message.clone())),
            None => Ok(serde_json::json!({})),
        }
    }
}

pub const SCENARIO_A_BLOB: &str = r#"{"defi_setup_done":true,"frontend_timeframe_setting":"REMEMBER","last_known_timeframe":"ALL","query_period":5}"#;
