use crate::domain::enums::ExternalInteractionType;
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{
    expect_string, field, first_present, optional_string, validate_non_empty_string, Mapping,
};
use serde::Serialize;
use serde_json::Value;

/// A single operation name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Operation {
    Single(String),
    Many(Vec<String>),
}

impl Operation {
    fn parse(value: &Value) -> Result<Self> {
        const EXPECTED: &str = "a string or a list of strings";
        match value {
            Value::String(name) => Ok(Operation::Single(name.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| SchemaError::invalid_type("operation", EXPECTED))
                })
                .collect::<Result<Vec<_>>>()
                .map(Operation::Many),
            _ => Err(SchemaError::invalid_type("operation", EXPECTED)),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Operation::Single(name) => vec![name.as_str()],
            Operation::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalInteraction {
    keyname: String,
    type_interaction: Option<String>,
    type_interaction_standard: Option<ExternalInteractionType>,
    operation: Option<Operation>,
    description: Option<String>,
}

impl ExternalInteraction {
    /// `keyname` overrides any `keyname` found inside `data`; it is supplied
    /// when interactions are declared as a mapping keyed by name.
    pub fn from_mapping(data: &Mapping, keyname: Option<&str>) -> Result<Self> {
        let keyname = match keyname {
            Some(keyname) => keyname.to_string(),
            None => {
                let value = field(data, "keyname").ok_or_else(|| SchemaError::missing("keyname"))?;
                expect_string("keyname", value)?
            }
        };
        validate_non_empty_string("keyname", &keyname)?;

        let operation = field(data, "operation").map(Operation::parse).transpose()?;

        let type_interaction = optional_string(data, "type_interaction")?;
        let type_interaction_standard = type_interaction.as_deref().and_then(|raw| {
            let resolved = ExternalInteractionType::resolve(raw);
            if resolved.is_none() {
                tracing::debug!(keyname = %keyname, type_interaction = raw, "unrecognized interaction type");
            }
            resolved
        });

        // `desc` is the legacy spelling
        let description = first_present(data, &["description", "desc"])
            .map(|(key, value)| expect_string(key, value))
            .transpose()?;

        Ok(Self {
            keyname,
            type_interaction,
            type_interaction_standard,
            operation,
            description,
        })
    }

    pub fn keyname(&self) -> &str {
        &self.keyname
    }

    pub fn type_interaction(&self) -> Option<&str> {
        self.type_interaction.as_deref()
    }

    pub fn type_interaction_standard(&self) -> Option<ExternalInteractionType> {
        self.type_interaction_standard
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
