use crate::utils::error::Result;
use crate::utils::validation::{
    field, optional_count, optional_string, required_string, Mapping,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerSchedule {
    pub cronjob: String,
    /// Passed through untouched.
    pub event: Option<Value>,
    pub timezone: Option<String>,
    pub description: Option<String>,
    pub retry_policy: Option<String>,
    pub max_attempts: Option<u64>,
}

impl TriggerSchedule {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        let cronjob = required_string(data, "cronjob")?;
        let timezone = optional_string(data, "timezone")?;
        if let Some(timezone) = &timezone {
            validate_timezone(timezone)?;
        }

        Ok(Self {
            cronjob,
            event: field(data, "event").cloned(),
            timezone,
            description: optional_string(data, "description")?,
            retry_policy: optional_string(data, "retry_policy")?,
            max_attempts: optional_count(data, "max_attempts")?,
        })
    }
}

#[cfg(feature = "tz")]
fn validate_timezone(timezone: &str) -> Result<()> {
    timezone.parse::<chrono_tz::Tz>().map(|_| ()).map_err(|_| {
        crate::utils::error::SchemaError::invalid_value(
            "timezone",
            timezone,
            "Not a recognized IANA timezone (e.g. 'Europe/Madrid', 'UTC')",
        )
    })
}

#[cfg(not(feature = "tz"))]
fn validate_timezone(timezone: &str) -> Result<()> {
    tracing::debug!(timezone, "timezone database not compiled in, skipping validation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SchemaError;
    use serde_json::json;

    fn parse(value: Value) -> Result<TriggerSchedule> {
        TriggerSchedule::from_mapping(value.as_object().unwrap())
    }

    #[test]
    fn test_schedule_options() {
        let schedule = parse(json!({
            "cronjob": "0 3 * * *",
            "event": {"source": "nightly", "dry_run": false},
            "timezone": "America/Bogota",
            "description": "Nightly reconciliation",
            "retry_policy": "fixed",
            "max_attempts": 3
        }))
        .unwrap();

        assert_eq!(schedule.cronjob, "0 3 * * *");
        assert_eq!(schedule.event, Some(json!({"source": "nightly", "dry_run": false})));
        assert_eq!(schedule.timezone.as_deref(), Some("America/Bogota"));
        assert_eq!(schedule.max_attempts, Some(3));
    }

    #[test]
    fn test_cronjob_required() {
        assert!(matches!(
            parse(json!({"event": "tick"})),
            Err(SchemaError::MissingRequiredField { ref field }) if field == "cronjob"
        ));
        assert!(matches!(
            parse(json!({"cronjob": ""})),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
    }

    #[cfg(feature = "tz")]
    #[test]
    fn test_unknown_timezone_rejected() {
        let err = parse(json!({"cronjob": "* * * * *", "timezone": "Mars/Olympus"})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldValue { ref field, .. } if field == "timezone"));
    }

    #[cfg(not(feature = "tz"))]
    #[test]
    fn test_timezone_accepted_without_database() {
        assert!(parse(json!({"cronjob": "* * * * *", "timezone": "Mars/Olympus"})).is_ok());
    }
}
