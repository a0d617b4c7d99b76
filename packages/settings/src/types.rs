// ABOUTME: Type definitions for frontend settings
// ABOUTME: Recognized setting keys, timeframe enums, the settings snapshot and update payloads

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

pub const QUERY_PERIOD_MIN_SECS: u64 = 5;
pub const QUERY_PERIOD_MAX_SECS: u64 = 3600;
pub const DEFAULT_QUERY_PERIOD_SECS: u64 = 5;

/// Time window the dashboard charts are drawn over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    All,
    Year,
    ThreeMonths,
    Month,
    TwoWeeks,
    Week,
}

impl Timeframe {
    pub const VARIANTS: [Timeframe; 6] = [
        Timeframe::All,
        Timeframe::Year,
        Timeframe::ThreeMonths,
        Timeframe::Month,
        Timeframe::TwoWeeks,
        Timeframe::Week,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::All => "ALL",
            Timeframe::Year => "YEAR",
            Timeframe::ThreeMonths => "THREE_MONTHS",
            Timeframe::Month => "MONTH",
            Timeframe::TwoWeeks => "TWO_WEEKS",
            Timeframe::Week => "WEEK",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::VARIANTS
            .iter()
            .copied()
            .find(|timeframe| timeframe.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Timeframe::VARIANTS.iter().map(|t| t.as_str()).collect();
                ValidationError::InvalidEnum(s.to_string(), allowed.join(", "))
            })
    }
}

/// Which timeframe the dashboard opens on: a fixed one, or the last one viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeframeSetting {
    Remember,
    Fixed(Timeframe),
}

impl TimeframeSetting {
    pub const REMEMBER: &'static str = "REMEMBER";

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeframeSetting::Remember => Self::REMEMBER,
            TimeframeSetting::Fixed(timeframe) => timeframe.as_str(),
        }
    }
}

impl fmt::Display for TimeframeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeframeSetting {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::REMEMBER {
            return Ok(TimeframeSetting::Remember);
        }

        s.parse::<Timeframe>().map(TimeframeSetting::Fixed).map_err(|_| {
            let mut allowed = vec![Self::REMEMBER];
            allowed.extend(Timeframe::VARIANTS.iter().map(|t| t.as_str()));
            ValidationError::InvalidEnum(s.to_string(), allowed.join(", "))
        })
    }
}

impl TryFrom<String> for TimeframeSetting {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeframeSetting> for String {
    fn from(setting: TimeframeSetting) -> Self {
        setting.as_str().to_string()
    }
}

/// Keys of the settings the frontend persists to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    DefiSetupDone,
    FrontendTimeframeSetting,
    LastKnownTimeframe,
    QueryPeriod,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::DefiSetupDone,
        SettingKey::FrontendTimeframeSetting,
        SettingKey::LastKnownTimeframe,
        SettingKey::QueryPeriod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DefiSetupDone => "defi_setup_done",
            SettingKey::FrontendTimeframeSetting => "frontend_timeframe_setting",
            SettingKey::LastKnownTimeframe => "last_known_timeframe",
            SettingKey::QueryPeriod => "query_period",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKey(s.to_string()))
    }
}

/// A single setting value, as read by key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Integer(u64),
    Text(String),
}

/// Snapshot of every frontend setting.
///
/// Fields are kept in alphabetical order so the serialized blob has a stable
/// key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSettings {
    pub defi_setup_done: bool,
    pub frontend_timeframe_setting: TimeframeSetting,
    pub last_known_timeframe: Timeframe,
    /// Seconds between balance refreshes
    pub query_period: u64,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            defi_setup_done: false,
            frontend_timeframe_setting: TimeframeSetting::Remember,
            last_known_timeframe: Timeframe::All,
            query_period: DEFAULT_QUERY_PERIOD_SECS,
        }
    }
}

impl FrontendSettings {
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::DefiSetupDone => SettingValue::Bool(self.defi_setup_done),
            SettingKey::FrontendTimeframeSetting => {
                SettingValue::Text(self.frontend_timeframe_setting.to_string())
            }
            SettingKey::LastKnownTimeframe => {
                SettingValue::Text(self.last_known_timeframe.to_string())
            }
            SettingKey::QueryPeriod => SettingValue::Integer(self.query_period),
        }
    }

    /// Right-biased merge: values present in `payload` win, everything else is kept.
    pub fn merge(&self, payload: &FrontendSettingsPayload) -> FrontendSettings {
        FrontendSettings {
            defi_setup_done: payload.defi_setup_done.unwrap_or(self.defi_setup_done),
            frontend_timeframe_setting: payload
                .frontend_timeframe_setting
                .unwrap_or(self.frontend_timeframe_setting),
            last_known_timeframe: payload
                .last_known_timeframe
                .unwrap_or(self.last_known_timeframe),
            query_period: payload.query_period.unwrap_or(self.query_period),
        }
    }

    /// Serialize the full snapshot into the blob stored by the backend
    pub fn to_blob(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Rebuild a snapshot from a persisted blob, falling back to defaults for
    /// keys that are missing or unreadable.
    pub fn restore(blob: &str) -> Result<FrontendSettings, ValidationError> {
        let payload = validation::parse_persisted(blob)?;
        Ok(FrontendSettings::default().merge(&payload))
    }

    /// Timeframe the dashboard should open on
    pub fn visible_timeframe(&self) -> Timeframe {
        match self.frontend_timeframe_setting {
            TimeframeSetting::Remember => self.last_known_timeframe,
            TimeframeSetting::Fixed(timeframe) => timeframe,
        }
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.query_period)
    }
}

/// Partial update of the frontend settings; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontendSettingsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defi_setup_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_timeframe_setting: Option<TimeframeSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_timeframe: Option<Timeframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_period: Option<u64>,
}

impl FrontendSettingsPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert an untyped payload, rejecting unknown keys and mistyped values
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        validation::parse_payload(&value)
    }

    pub fn with_defi_setup_done(mut self, done: bool) -> Self {
        self.defi_setup_done = Some(done);
        self
    }

    pub fn with_frontend_timeframe_setting(mut self, setting: TimeframeSetting) -> Self {
        self.frontend_timeframe_setting = Some(setting);
        self
    }

    pub fn with_last_known_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.last_known_timeframe = Some(timeframe);
        self
    }

    pub fn with_query_period(mut self, seconds: u64) -> Self {
        self.query_period = Some(seconds);
        self
    }

    /// Keys carried by this payload, in key order
    pub fn keys(&self) -> Vec<SettingKey> {
        let mut keys = Vec::new();
        if self.defi_setup_done.is_some() {
            keys.push(SettingKey::DefiSetupDone);
        }
        if self.frontend_timeframe_setting.is_some() {
            keys.push(SettingKey::FrontendTimeframeSetting);
        }
        if self.last_known_timeframe.is_some() {
            keys.push(SettingKey::LastKnownTimeframe);
        }
        if self.query_period.is_some() {
            keys.push(SettingKey::QueryPeriod);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}
