// ABOUTME: Named action dispatch for the settings module
// ABOUTME: Routes untyped action payloads to the typed settings updater

use serde_json::Value;
use tracing::warn;

use crate::error::{SettingsError, SettingsResult};
use crate::types::{FrontendSettings, FrontendSettingsPayload};
use crate::updater::SettingsUpdater;

pub const UPDATE_SETTING: &str = "settings/updateSetting";

pub struct SettingsActions {
    updater: SettingsUpdater,
}

impl SettingsActions {
    pub fn new(updater: SettingsUpdater) -> Self {
        Self { updater }
    }

    pub fn updater(&self) -> &SettingsUpdater {
        &self.updater
    }

    pub async fn state(&self) -> FrontendSettings {
        self.updater.current().await
    }

    pub async fn dispatch(&self, action: &str, payload: Value) -> SettingsResult<()> {
        match action {
            UPDATE_SETTING => {
                let payload = FrontendSettingsPayload::from_value(payload)?;
                self.updater.update_setting(payload).await
            }
            other => {
                warn!(action = other, "Unknown settings action");
                Err(SettingsError::UnknownAction(other.to_string()))
            }
        }
    }
}
