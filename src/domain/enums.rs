use crate::utils::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Business-importance tier of a use case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criticality {
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
    Critical,
}

const CRITICALITY_LEVELS: [(i64, Criticality); 5] = [
    (0, Criticality::Low),
    (1, Criticality::Medium),
    (2, Criticality::High),
    (3, Criticality::VeryHigh),
    (4, Criticality::Critical),
];

impl Criticality {
    pub const ALL: [Criticality; 5] = [
        Criticality::Low,
        Criticality::Medium,
        Criticality::High,
        Criticality::VeryHigh,
        Criticality::Critical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Criticality::Low => "LOW",
            Criticality::Medium => "MEDIUM",
            Criticality::High => "HIGH",
            Criticality::VeryHigh => "VERY_HIGH",
            Criticality::Critical => "CRITICAL",
        }
    }

    pub fn level(&self) -> i64 {
        CRITICALITY_LEVELS
            .iter()
            .find(|(_, criticality)| criticality == self)
            .map(|(level, _)| *level)
            .unwrap_or_default()
    }

    pub fn from_level(level: i64) -> Option<Self> {
        CRITICALITY_LEVELS
            .iter()
            .find(|(candidate, _)| *candidate == level)
            .map(|(_, criticality)| *criticality)
    }

    /// Case-insensitive match against member names (`"high"`, `"VERY_HIGH"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|criticality| criticality.name().eq_ignore_ascii_case(name))
    }

    /// Normalizes a raw descriptor value: an integer level, a member name, or
    /// the serialized form of the enum itself.
    pub fn resolve(value: &Value) -> Result<Self> {
        match value {
            Value::Number(number) => {
                let level = number
                    .as_i64()
                    .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
                level.and_then(Self::from_level).ok_or_else(|| {
                    SchemaError::invalid_value(
                        "criticality",
                        number.to_string(),
                        format!(
                            "Unknown criticality level. Valid levels: {}",
                            CRITICALITY_LEVELS
                                .iter()
                                .map(|(level, c)| format!("{} ({})", level, c.name()))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    )
                })
            }
            Value::String(name) => {
                Self::from_name(name).ok_or_else(|| SchemaError::UnknownEnumerationValue {
                    enumeration: "criticality",
                    value: name.clone(),
                    expected: Self::ALL.iter().map(Criticality::name).collect(),
                })
            }
            _ => Err(SchemaError::invalid_type(
                "criticality",
                "an integer level or a criticality name",
            )),
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Delivery guarantee of a message consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySemantic {
    #[default]
    AtLeastOnce,
    AtMostOnce,
    ExactlyOnce,
}

impl DeliverySemantic {
    pub const ALL: [DeliverySemantic; 3] = [
        DeliverySemantic::AtLeastOnce,
        DeliverySemantic::AtMostOnce,
        DeliverySemantic::ExactlyOnce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverySemantic::AtLeastOnce => "at_least_once",
            DeliverySemantic::AtMostOnce => "at_most_once",
            DeliverySemantic::ExactlyOnce => "exactly_once",
        }
    }

    /// Accepts `at_least_once`, `at-least-once`, `AT_LEAST_ONCE`, ...
    pub fn from_value(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|semantic| semantic.as_str() == normalized)
            .ok_or_else(|| SchemaError::UnknownEnumerationValue {
                enumeration: "delivery semantic",
                value: value.to_string(),
                expected: Self::ALL.iter().map(DeliverySemantic::as_str).collect(),
            })
    }
}

impl fmt::Display for DeliverySemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standardized category of an external system a use case talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalInteractionType {
    Database,
    Cache,
    Publisher,
    Notifier,
    FileStorage,
    ExternalApi,
}

const INTERACTION_ALIASES: &[(&str, ExternalInteractionType)] = &[
    ("database", ExternalInteractionType::Database),
    ("db", ExternalInteractionType::Database),
    ("rdbms", ExternalInteractionType::Database),
    ("sql", ExternalInteractionType::Database),
    ("nosql", ExternalInteractionType::Database),
    ("repository", ExternalInteractionType::Database),
    ("cache", ExternalInteractionType::Cache),
    ("redis", ExternalInteractionType::Cache),
    ("memcached", ExternalInteractionType::Cache),
    ("publisher", ExternalInteractionType::Publisher),
    ("queue", ExternalInteractionType::Publisher),
    ("broker", ExternalInteractionType::Publisher),
    ("event_bus", ExternalInteractionType::Publisher),
    ("topic", ExternalInteractionType::Publisher),
    ("notifier", ExternalInteractionType::Notifier),
    ("notification", ExternalInteractionType::Notifier),
    ("email", ExternalInteractionType::Notifier),
    ("sms", ExternalInteractionType::Notifier),
    ("file_storage", ExternalInteractionType::FileStorage),
    ("storage", ExternalInteractionType::FileStorage),
    ("file_uploader", ExternalInteractionType::FileStorage),
    ("blob", ExternalInteractionType::FileStorage),
    ("s3", ExternalInteractionType::FileStorage),
    ("sftp", ExternalInteractionType::FileStorage),
    ("external_api", ExternalInteractionType::ExternalApi),
    ("api", ExternalInteractionType::ExternalApi),
    ("http", ExternalInteractionType::ExternalApi),
    ("rest", ExternalInteractionType::ExternalApi),
    ("third_party", ExternalInteractionType::ExternalApi),
];

impl ExternalInteractionType {
    /// Alias lookup. The taxonomy is open, so an unknown alias is `None`
    /// rather than an error.
    pub fn resolve(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        INTERACTION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, kind)| *kind)
    }
}
