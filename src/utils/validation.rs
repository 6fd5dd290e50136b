use crate::utils::error::{Result, SchemaError};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw descriptor mapping as produced by the loader.
pub type Mapping = Map<String, Value>;

/// Looks up `key`, treating an explicit null the same as an absent key.
pub fn field<'a>(data: &'a Mapping, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|value| !value.is_null())
}

/// Ordered-preference lookup: the first key present wins.
pub fn first_present<'a>(data: &'a Mapping, keys: &[&str]) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|key| data.get_key_value(*key).filter(|(_, value)| !value.is_null()))
        .map(|(key, value)| (key.as_str(), value))
}

pub fn as_mapping<'a>(field_name: &str, value: &'a Value) -> Result<&'a Mapping> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::invalid_type(field_name, "a mapping"))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchemaError::invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn expect_string(field_name: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::invalid_type(field_name, "a string"))
}

pub fn required_string(data: &Mapping, field_name: &str) -> Result<String> {
    let value = field(data, field_name).ok_or_else(|| SchemaError::missing(field_name))?;
    let value = expect_string(field_name, value)?;
    validate_non_empty_string(field_name, &value)?;
    Ok(value)
}

pub fn optional_string(data: &Mapping, field_name: &str) -> Result<Option<String>> {
    field(data, field_name)
        .map(|value| expect_string(field_name, value))
        .transpose()
}

pub fn optional_non_empty_string(data: &Mapping, field_name: &str) -> Result<Option<String>> {
    let value = optional_string(data, field_name)?;
    if let Some(value) = &value {
        validate_non_empty_string(field_name, value)?;
    }
    Ok(value)
}

pub fn optional_bool(data: &Mapping, field_name: &str, default: bool) -> Result<bool> {
    match field(data, field_name) {
        None => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| SchemaError::invalid_type(field_name, "a boolean")),
    }
}

/// Reads a non-negative integer (counts, delays, timeouts).
pub fn non_negative_integer(field_name: &str, value: &Value) -> Result<u64> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    if let Some(n) = value.as_i64() {
        return Err(SchemaError::invalid_value(
            field_name,
            n.to_string(),
            "Value must be a non-negative integer",
        ));
    }
    Err(SchemaError::invalid_type(field_name, "a non-negative integer"))
}

pub fn optional_count(data: &Mapping, field_name: &str) -> Result<Option<u64>> {
    field(data, field_name)
        .map(|value| non_negative_integer(field_name, value))
        .transpose()
}

pub fn optional_string_list(data: &Mapping, field_name: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = field(data, field_name) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid_type(field_name, "a list of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::invalid_type(field_name, "a list of strings"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Reads a string-to-string mapping such as `tags` or `mapper`.
pub fn string_map(field_name: &str, value: &Value) -> Result<HashMap<String, String>> {
    let mapping = as_mapping(field_name, value)?;
    let mut result = HashMap::with_capacity(mapping.len());
    for (key, item) in mapping {
        let item = item
            .as_str()
            .ok_or_else(|| SchemaError::invalid_type(format!("{}.{}", field_name, key), "a string"))?;
        result.insert(key.clone(), item.to_string());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Mapping {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_string() {
        let data = mapping(json!({"name": "orders", "blank": "  ", "number": 3}));
        assert_eq!(required_string(&data, "name").unwrap(), "orders");
        assert!(matches!(
            required_string(&data, "missing"),
            Err(SchemaError::MissingRequiredField { .. })
        ));
        assert!(matches!(
            required_string(&data, "blank"),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            required_string(&data, "number"),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_null_is_absent() {
        let data = mapping(json!({"actor": null, "cacheable": null}));
        assert_eq!(optional_string(&data, "actor").unwrap(), None);
        assert!(!optional_bool(&data, "cacheable", false).unwrap());
    }

    #[test]
    fn test_first_present_prefers_earlier_keys() {
        let data = mapping(json!({"route": "/legacy", "path": "/orders"}));
        let (key, value) = first_present(&data, &["path", "route"]).unwrap();
        assert_eq!(key, "path");
        assert_eq!(value, "/orders");

        let legacy = mapping(json!({"route": "/legacy"}));
        assert_eq!(first_present(&legacy, &["path", "route"]).unwrap().0, "route");
    }

    #[test]
    fn test_non_negative_integer() {
        assert_eq!(non_negative_integer("timeout", &json!(30)).unwrap(), 30);
        assert!(matches!(
            non_negative_integer("timeout", &json!(-1)),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            non_negative_integer("timeout", &json!("30")),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_string_map_rejects_non_string_values() {
        let err = string_map("tags", &json!({"team": 1})).unwrap_err();
        assert_eq!(err.to_string(), "tags.team must be a string");
    }
}
