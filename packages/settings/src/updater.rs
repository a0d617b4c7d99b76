// ABOUTME: Validated settings updates: validate, merge, persist remotely, then commit
// ABOUTME: Local state only changes after the backend has accepted the merged snapshot

use std::sync::Arc;

use tally_config::ServiceConfig;
use tracing::{debug, error, info, warn};

use crate::error::{SettingsError, SettingsResult};
use crate::http::HttpSettingsService;
use crate::service::{ServiceResult, SettingsService, SettingsUpdateRequest};
use crate::store::SettingsState;
use crate::types::{FrontendSettings, FrontendSettingsPayload, SettingKey};
use crate::validation::validate_payload;

/// Applies partial settings updates against a state container and a remote service
#[derive(Clone)]
pub struct SettingsUpdater {
    service: Arc<dyn SettingsService>,
    state: Arc<dyn SettingsState>,
}

impl SettingsUpdater {
    pub fn new(service: Arc<dyn SettingsService>, state: Arc<dyn SettingsState>) -> Self {
        Self { service, state }
    }

    /// Updater that persists through the HTTP backend described by `config`
    pub fn http(config: &ServiceConfig, state: Arc<dyn SettingsState>) -> ServiceResult<Self> {
        let service = HttpSettingsService::new(config)?;
        Ok(Self::new(Arc::new(service), state))
    }

    pub async fn current(&self) -> FrontendSettings {
        self.state.snapshot().await
    }

    /// Merge `payload` into the current settings and persist the result.
    ///
    /// Either the whole merged snapshot is committed or the state is left as
    /// it was. Overlapping calls are not serialized; the last commit wins.
    pub async fn update_setting(&self, payload: FrontendSettingsPayload) -> SettingsResult<()> {
        let keys = key_names(&payload);
        debug!(?keys, "Updating frontend settings");

        if let Err(e) = validate_payload(&payload) {
            warn!(?keys, error = %e, "Rejected frontend settings update");
            return Err(e.into());
        }

        let merged = self.state.snapshot().await.merge(&payload);
        let request = SettingsUpdateRequest::from_settings(&merged)?;

        if let Err(e) = self.service.set_settings(request).await {
            error!(?keys, error = %e, "Backend refused frontend settings update");
            return Err(SettingsError::RemoteUpdate(e));
        }

        self.state.commit(merged).await;
        info!(?keys, "Frontend settings updated");

        Ok(())
    }
}

fn key_names(payload: &FrontendSettingsPayload) -> Vec<&'static str> {
    payload.keys().iter().map(SettingKey::as_str).collect()
}
