// ABOUTME: Frontend settings state with validated updates persisted to the Tally backend
// ABOUTME: Validates partial updates, merges them, saves the full snapshot remotely, then commits locally

pub mod actions;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod types;
pub mod updater;
pub mod validation;

pub use actions::{SettingsActions, UPDATE_SETTING};
pub use error::{SettingsError, SettingsResult};
pub use http::HttpSettingsService;
pub use service::{ServiceError, ServiceResult, SettingsService, SettingsUpdateRequest};
pub use store::{SettingsState, SettingsStore};
pub use types::{
    FrontendSettings, FrontendSettingsPayload, SettingKey, SettingValue, Timeframe,
    TimeframeSetting, QUERY_PERIOD_MAX_SECS, QUERY_PERIOD_MIN_SECS,
};
pub use updater::SettingsUpdater;
pub use validation::ValidationError;
