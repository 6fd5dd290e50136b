use crate::utils::error::Result;
use crate::utils::validation::{field, optional_string, required_string, string_map, Mapping};
use serde::Serialize;
use std::collections::HashMap;

/// Fields shared by services and use cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    tags: HashMap<String, String>,
}

impl EntityInfo {
    /// Parses the common fields. `inherited_tags` are overlaid by the
    /// entity's own `tags`, so the entity wins on key collision.
    pub fn from_mapping(data: &Mapping, inherited_tags: Option<&HashMap<String, String>>) -> Result<Self> {
        let name = required_string(data, "name")?;
        let own_tags = field(data, "tags")
            .map(|value| string_map("tags", value))
            .transpose()?
            .unwrap_or_default();

        let tags = match inherited_tags {
            Some(inherited) => {
                let mut merged = inherited.clone();
                merged.extend(own_tags);
                merged
            }
            None => own_tags,
        };

        Ok(Self {
            name,
            description: optional_string(data, "description")?,
            entity_type: optional_string(data, "type")?,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }
}
