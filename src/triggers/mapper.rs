use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{as_mapping, field, string_map, Mapping};
use std::collections::HashMap;

/// Source path (`"body.user_id"`) to target parameter name.
pub type Mapper = HashMap<String, String>;

pub const HTTP_SOURCES: &[&str] = &["path_query", "body", "params", "headers", "context"];
pub const EVENT_SOURCES: &[&str] = &["event", "context"];

/// Checks that the first dot-separated segment of every source path is one of
/// `allowed`. A path without a dot is its own prefix.
pub fn verify_source_prefix<'a>(
    source_paths: impl IntoIterator<Item = &'a str>,
    allowed: &[&'static str],
) -> Result<()> {
    for source_path in source_paths {
        let prefix = source_path
            .split_once('.')
            .map_or(source_path, |(prefix, _)| prefix);
        if !allowed.contains(&prefix) {
            let mut expected = allowed.to_vec();
            expected.sort_unstable();
            return Err(SchemaError::InvalidMapperPrefix {
                source_path: source_path.to_string(),
                prefix: prefix.to_string(),
                allowed: expected,
            });
        }
    }
    Ok(())
}

/// Reads the optional `mapper` field of trigger options. Paths are checked in
/// input order so the first offending key is the one reported.
pub fn parse_mapper(data: &Mapping, allowed: &[&'static str]) -> Result<Option<Mapper>> {
    let Some(value) = field(data, "mapper") else {
        return Ok(None);
    };
    let raw = as_mapping("mapper", value)?;
    verify_source_prefix(raw.keys().map(String::as_str), allowed)?;
    string_map("mapper", value).map(Some)
}
