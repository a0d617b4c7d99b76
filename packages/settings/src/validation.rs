// ABOUTME: Input validation for frontend settings updates
// ABOUTME: Payload checks, per-key type conversion and lenient parsing of persisted snapshots

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::types::{
    FrontendSettingsPayload, SettingKey, Timeframe, TimeframeSetting, QUERY_PERIOD_MAX_SECS,
    QUERY_PERIOD_MIN_SECS,
};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("empty settings payload")]
    EmptyPayload,

    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: SettingKey, reason: String },

    #[error("Invalid enum value: {0}. Must be one of: {1}")]
    InvalidEnum(String, String),

    #[error("Invalid query period: {0}. Must be between {min} and {max} seconds", min = QUERY_PERIOD_MIN_SECS, max = QUERY_PERIOD_MAX_SECS)]
    QueryPeriodOutOfRange(u64),

    #[error("Settings payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Malformed settings snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Check an update payload before anything is merged or sent
pub fn validate_payload(payload: &FrontendSettingsPayload) -> Result<(), ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    if let Some(period) = payload.query_period {
        validate_query_period(period)?;
    }

    Ok(())
}

/// Validate the refresh period in seconds
pub fn validate_query_period(seconds: u64) -> Result<(), ValidationError> {
    if (QUERY_PERIOD_MIN_SECS..=QUERY_PERIOD_MAX_SECS).contains(&seconds) {
        Ok(())
    } else {
        Err(ValidationError::QueryPeriodOutOfRange(seconds))
    }
}

/// Strict conversion of an untyped payload: any unknown key or mistyped value fails
pub(crate) fn parse_payload(value: &Value) -> Result<FrontendSettingsPayload, ValidationError> {
    let object = as_object(value)?;
    let mut payload = FrontendSettingsPayload::new();

    for (name, value) in object {
        let key = name.parse::<SettingKey>()?;
        apply_value(&mut payload, key, value)?;
    }

    Ok(payload)
}

/// Lenient conversion of a persisted snapshot: bad entries are dropped with a warning
pub(crate) fn parse_persisted(blob: &str) -> Result<FrontendSettingsPayload, ValidationError> {
    let value: Value = serde_json::from_str(blob)
        .map_err(|e| ValidationError::MalformedSnapshot(e.to_string()))?;
    let object = as_object(&value)
        .map_err(|e| ValidationError::MalformedSnapshot(e.to_string()))?;

    let mut payload = FrontendSettingsPayload::new();
    for (name, value) in object {
        let key = match name.parse::<SettingKey>() {
            Ok(key) => key,
            Err(_) => {
                warn!(key = %name, "Dropping unknown key from persisted settings");
                continue;
            }
        };

        if let Err(e) = apply_value(&mut payload, key, value) {
            warn!(%key, error = %e, "Using default for unreadable persisted setting");
        }
    }

    if let Some(period) = payload.query_period {
        if let Err(e) = validate_query_period(period) {
            warn!(error = %e, "Using default for persisted query period");
            payload.query_period = None;
        }
    }

    Ok(payload)
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => Err(ValidationError::NotAnObject("null")),
        Value::Bool(_) => Err(ValidationError::NotAnObject("a boolean")),
        Value::Number(_) => Err(ValidationError::NotAnObject("a number")),
        Value::String(_) => Err(ValidationError::NotAnObject("a string")),
        Value::Array(_) => Err(ValidationError::NotAnObject("an array")),
    }
}

fn apply_value(
    payload: &mut FrontendSettingsPayload,
    key: SettingKey,
    value: &Value,
) -> Result<(), ValidationError> {
    match key {
        SettingKey::DefiSetupDone => {
            let done = value
                .as_bool()
                .ok_or_else(|| invalid(key, "expected a boolean"))?;
            payload.defi_setup_done = Some(done);
        }
        SettingKey::FrontendTimeframeSetting => {
            let raw = value.as_str().ok_or_else(|| invalid(key, "expected a string"))?;
            let setting = raw
                .parse::<TimeframeSetting>()
                .map_err(|e| invalid(key, &e.to_string()))?;
            payload.frontend_timeframe_setting = Some(setting);
        }
        SettingKey::LastKnownTimeframe => {
            let raw = value.as_str().ok_or_else(|| invalid(key, "expected a string"))?;
            let timeframe = raw
                .parse::<Timeframe>()
                .map_err(|e| invalid(key, &e.to_string()))?;
            payload.last_known_timeframe = Some(timeframe);
        }
        SettingKey::QueryPeriod => {
            let seconds = value
                .as_u64()
                .ok_or_else(|| invalid(key, "expected a non-negative integer"))?;
            payload.query_period = Some(seconds);
        }
    }

    Ok(())
}

fn invalid(key: SettingKey, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        key,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrontendSettings;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_validate_empty_payload() {
        let err = validate_payload(&FrontendSettingsPayload::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyPayload));
        assert_eq!(err.to_string(), "empty settings payload");
    }

    #[test]
    fn test_validate_single_key_payload() {
        let payload = FrontendSettingsPayload::new().with_defi_setup_done(true);
        assert!(validate_payload(&payload).is_ok());
    }

    #[rstest]
    #[case(5, true)]
    #[case(3600, true)]
    #[case(60, true)]
    #[case(4, false)]
    #[case(0, false)]
    #[case(3601, false)]
    fn test_validate_query_period(#[case] seconds: u64, #[case] valid: bool) {
        assert_eq!(validate_query_period(seconds).is_ok(), valid);
        let payload = FrontendSettingsPayload::new().with_query_period(seconds);
        assert_eq!(validate_payload(&payload).is_ok(), valid);
    }

    #[test]
    fn test_parse_payload_all_keys() {
        let payload = parse_payload(&json!({
            "defi_setup_done": true,
            "frontend_timeframe_setting": "WEEK",
            "last_known_timeframe": "TWO_WEEKS",
            "query_period": 15
        }))
        .unwrap();

        assert_eq!(
            payload,
            FrontendSettingsPayload::new()
                .with_defi_setup_done(true)
                .with_frontend_timeframe_setting(TimeframeSetting::Fixed(Timeframe::Week))
                .with_last_known_timeframe(Timeframe::TwoWeeks)
                .with_query_period(15)
        );
    }

    #[test]
    fn test_parse_payload_empty_object() {
        let payload = parse_payload(&json!({})).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_parse_payload_unknown_key() {
        let err = parse_payload(&json!({"defi_setup_done": true, "theme": "dark"})).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownKey(key) if key == "theme"));
    }

    #[rstest]
    #[case(json!({"defi_setup_done": "yes"}), SettingKey::DefiSetupDone)]
    #[case(json!({"frontend_timeframe_setting": true}), SettingKey::FrontendTimeframeSetting)]
    #[case(json!({"frontend_timeframe_setting": "FOREVER"}), SettingKey::FrontendTimeframeSetting)]
    #[case(json!({"last_known_timeframe": "REMEMBER"}), SettingKey::LastKnownTimeframe)]
    #[case(json!({"query_period": -5}), SettingKey::QueryPeriod)]
    #[case(json!({"query_period": 2.5}), SettingKey::QueryPeriod)]
    #[case(json!({"query_period": "5"}), SettingKey::QueryPeriod)]
    fn test_parse_payload_wrong_type(#[case] value: Value, #[case] expected: SettingKey) {
        let err = parse_payload(&value).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { key, .. } if key == expected));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([{"defi_setup_done": true}]))]
    #[case(json!("defi_setup_done"))]
    fn test_parse_payload_not_an_object(#[case] value: Value) {
        assert!(matches!(
            parse_payload(&value),
            Err(ValidationError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_restore_full_snapshot() {
        let restored = FrontendSettings::restore(
            r#"{"defi_setup_done":true,"frontend_timeframe_setting":"YEAR","last_known_timeframe":"MONTH","query_period":30}"#,
        )
        .unwrap();

        assert_eq!(
            restored,
            FrontendSettings {
                defi_setup_done: true,
                frontend_timeframe_setting: TimeframeSetting::Fixed(Timeframe::Year),
                last_known_timeframe: Timeframe::Month,
                query_period: 30,
            }
        );
    }

    #[test]
    fn test_restore_fills_missing_keys_with_defaults() {
        let restored = FrontendSettings::restore(r#"{"defi_setup_done":true}"#).unwrap();
        assert_eq!(
            restored,
            FrontendSettings {
                defi_setup_done: true,
                ..FrontendSettings::default()
            }
        );
    }

    #[test]
    fn test_restore_drops_unknown_and_bad_values() {
        let restored = FrontendSettings::restore(
            r#"{"theme":"dark","last_known_timeframe":"DECADE","query_period":1,"defi_setup_done":true}"#,
        )
        .unwrap();

        assert_eq!(
            restored,
            FrontendSettings {
                defi_setup_done: true,
                ..FrontendSettings::default()
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("not json")]
    #[case("[]")]
    #[case("42")]
    fn test_restore_malformed(#[case] blob: &str) {
        assert!(matches!(
            FrontendSettings::restore(blob),
            Err(ValidationError::MalformedSnapshot(_))
        ));
    }
}
