use crate::triggers::mapper::{parse_mapper, Mapper, HTTP_SOURCES};
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{
    expect_string, field, first_present, non_negative_integer, optional_bool, optional_count,
    optional_string, optional_string_list, Mapping,
};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

static RATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)r/([sm])$").expect("rate limit pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateWindow {
    Second,
    Minute,
}

/// Either a plain request budget (`100`) or a rate (`"100r/s"`, `"250r/m"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Requests(u64),
    Rate { requests: u64, window: RateWindow },
}

impl RateLimit {
    pub fn parse(value: &Value) -> Result<Self> {
        if value.is_number() {
            return non_negative_integer("rate_limit", value).map(RateLimit::Requests);
        }
        let raw = value.as_str().ok_or_else(|| {
            SchemaError::invalid_type("rate_limit", "a non-negative integer or a rate string")
        })?;
        let invalid = || {
            SchemaError::invalid_value(
                "rate_limit",
                raw,
                "Expected a non-negative integer or '<digits>r/s' / '<digits>r/m' (e.g. '100r/s')",
            )
        };
        let caps = RATE_PATTERN.captures(raw).ok_or_else(invalid)?;
        let requests = caps[1].parse::<u64>().map_err(|_| invalid())?;
        let window = if &caps[2] == "s" {
            RateWindow::Second
        } else {
            RateWindow::Minute
        };
        Ok(RateLimit::Rate { requests, window })
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimit::Requests(n) => write!(f, "{}", n),
            RateLimit::Rate { requests, window } => {
                let unit = match window {
                    RateWindow::Second => 's',
                    RateWindow::Minute => 'm',
                };
                write!(f, "{}r/{}", requests, unit)
            }
        }
    }
}

impl Serialize for RateLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RateLimit::Requests(n) => serializer.serialize_u64(*n),
            rate => serializer.collect_str(rate),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriggerHttp {
    pub method: Option<String>,
    pub authenticator: Option<String>,
    pub path: Option<String>,
    pub apigw: Option<String>,
    pub cacheable: bool,
    pub allow_cors: bool,
    pub allowed_origins: Option<Vec<String>>,
    pub content_type: Option<String>,
    /// Milliseconds.
    pub timeout: Option<u64>,
    pub rate_limit: Option<RateLimit>,
    pub retry_policy: Option<String>,
    pub mapper: Option<Mapper>,
}

impl TriggerHttp {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        let mapper = parse_mapper(data, HTTP_SOURCES)?;
        // `route` is the legacy spelling of `path`
        let path = first_present(data, &["path", "route"])
            .map(|(key, value)| expect_string(key, value))
            .transpose()?;

        Ok(Self {
            method: optional_string(data, "method")?,
            authenticator: optional_string(data, "authenticator")?,
            path,
            apigw: optional_string(data, "apigw")?,
            cacheable: optional_bool(data, "cacheable", false)?,
            allow_cors: optional_bool(data, "allow_cors", false)?,
            allowed_origins: optional_string_list(data, "allowed_origins")?,
            content_type: optional_string(data, "content_type")?,
            timeout: optional_count(data, "timeout")?,
            rate_limit: field(data, "rate_limit").map(RateLimit::parse).transpose()?,
            retry_policy: optional_string(data, "retry_policy")?,
            mapper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<TriggerHttp> {
        TriggerHttp::from_mapping(value.as_object().unwrap())
    }

    #[test]
    fn test_full_http_options() {
        let http = parse(json!({
            "method": "POST",
            "authenticator": "jwt",
            "path": "/orders/{id}",
            "apigw": "public",
            "cacheable": true,
            "allow_cors": true,
            "allowed_origins": ["https://shop.example.com"],
            "content_type": "application/json",
            "timeout": 3000,
            "rate_limit": "100r/s",
            "retry_policy": "exponential",
            "mapper": {"body.user_id": "uid", "path_query.id": "order_id"}
        }))
        .unwrap();

        assert_eq!(http.method.as_deref(), Some("POST"));
        assert_eq!(http.path.as_deref(), Some("/orders/{id}"));
        assert!(http.cacheable);
        assert!(http.allow_cors);
        assert_eq!(http.allowed_origins.unwrap(), vec!["https://shop.example.com"]);
        assert_eq!(http.timeout, Some(3000));
        assert_eq!(
            http.rate_limit,
            Some(RateLimit::Rate {
                requests: 100,
                window: RateWindow::Second
            })
        );
        assert_eq!(http.mapper.unwrap()["body.user_id"], "uid");
    }

    #[test]
    fn test_defaults() {
        let http = parse(json!({})).unwrap();
        assert_eq!(http, TriggerHttp::default());
        assert!(!http.cacheable);
        assert!(!http.allow_cors);
    }

    #[test]
    fn test_route_is_legacy_path() {
        let http = parse(json!({"route": "/legacy"})).unwrap();
        assert_eq!(http.path.as_deref(), Some("/legacy"));

        let both = parse(json!({"route": "/legacy", "path": "/current"})).unwrap();
        assert_eq!(both.path.as_deref(), Some("/current"));
    }

    #[test]
    fn test_rate_limit_patterns() {
        assert!(RateLimit::parse(&json!("100r/s")).is_ok());
        assert_eq!(RateLimit::parse(&json!("250r/m")).unwrap().to_string(), "250r/m");
        assert_eq!(RateLimit::parse(&json!(100)).unwrap(), RateLimit::Requests(100));

        for bad in ["100/s", "abc", "100r/h", " 100r/s"] {
            let err = RateLimit::parse(&json!(bad)).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidFieldValue { .. }));
            assert!(err.to_string().contains("r/s"));
        }
        assert!(RateLimit::parse(&json!(-5)).is_err());
        assert!(matches!(
            RateLimit::parse(&json!(true)),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_mapper_prefix_enforced() {
        assert!(parse(json!({"mapper": {"body.user_id": "uid"}})).is_ok());
        let err = parse(json!({"mapper": {"unknown_prefix.x": "y"}})).unwrap_err();
        assert!(err.to_string().contains("'unknown_prefix'"));
    }

    #[test]
    fn test_malformed_optional_fields() {
        assert!(matches!(
            parse(json!({"cacheable": "yes"})),
            Err(SchemaError::InvalidFieldType { .. })
        ));
        assert!(matches!(
            parse(json!({"timeout": -1})),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            parse(json!({"allowed_origins": ["a", 1]})),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }
}
