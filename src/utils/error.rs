use std::fmt;
use thiserror::Error;

use crate::triggers::TriggerKind;

/// Where inside a descriptor a nested failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    UseCase(String),
    Trigger(usize),
    TriggerOptions(TriggerKind),
    ExternalInteraction(usize),
    ExternalInteractionKey(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::UseCase(key) => write!(f, "use case '{}'", key),
            Location::Trigger(index) => write!(f, "trigger #{}", index),
            Location::TriggerOptions(kind) => write!(f, "options of {} trigger", kind),
            Location::ExternalInteraction(index) => write!(f, "external interaction #{}", index),
            Location::ExternalInteractionKey(key) => write!(f, "external interaction '{}'", key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidFieldType,
    InvalidFieldValue,
    UnknownEnumerationValue,
    InvalidMapperPrefix,
    NestedParseFailure,
    Io,
    DescriptorFormat,
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{field} is required")]
    MissingRequiredField { field: String },

    #[error("{field} must be {expected}")]
    InvalidFieldType { field: String, expected: &'static str },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("unknown {enumeration} '{value}'. Expected one of: {}", expected.join(", "))]
    UnknownEnumerationValue {
        enumeration: &'static str,
        value: String,
        expected: Vec<&'static str>,
    },

    #[error(
        "invalid source path '{source_path}': unknown prefix '{prefix}'. Expected one of: {}",
        allowed.join(", ")
    )]
    InvalidMapperPrefix {
        source_path: String,
        prefix: String,
        allowed: Vec<&'static str>,
    },

    #[error("{location}: {source}")]
    NestedParseFailure {
        location: Location,
        source: Box<SchemaError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{format} descriptor error: {message}")]
    DescriptorFormat { format: String, message: String },
}

impl SchemaError {
    pub fn missing(field: impl Into<String>) -> Self {
        SchemaError::MissingRequiredField {
            field: field.into(),
        }
    }

    pub fn invalid_type(field: impl Into<String>, expected: &'static str) -> Self {
        SchemaError::InvalidFieldType {
            field: field.into(),
            expected,
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SchemaError::InvalidFieldValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Wraps `self` with the location of the child entity that failed.
    pub fn within(self, location: Location) -> Self {
        SchemaError::NestedParseFailure {
            location,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            SchemaError::InvalidFieldType { .. } => ErrorKind::InvalidFieldType,
            SchemaError::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
            SchemaError::UnknownEnumerationValue { .. } => ErrorKind::UnknownEnumerationValue,
            SchemaError::InvalidMapperPrefix { .. } => ErrorKind::InvalidMapperPrefix,
            SchemaError::NestedParseFailure { .. } => ErrorKind::NestedParseFailure,
            SchemaError::Io(_) => ErrorKind::Io,
            SchemaError::DescriptorFormat { .. } => ErrorKind::DescriptorFormat,
        }
    }

    /// Innermost error of a nested chain (`self` when not nested).
    pub fn root_cause(&self) -> &SchemaError {
        let mut current = self;
        while let SchemaError::NestedParseFailure { source, .. } = current {
            current = source;
        }
        current
    }

    /// Locations from the outermost entity down to the one that failed.
    pub fn path(&self) -> Vec<&Location> {
        let mut locations = Vec::new();
        let mut current = self;
        while let SchemaError::NestedParseFailure { location, source } = current {
            locations.push(location);
            current = source;
        }
        locations
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.root_cause() {
            SchemaError::MissingRequiredField { field } => {
                format!("Add the '{}' field to the descriptor", field)
            }
            SchemaError::InvalidFieldType { field, expected } => {
                format!("Change '{}' so that it is {}", field, expected)
            }
            SchemaError::InvalidFieldValue { field, .. } => {
                format!("Check the value of '{}'", field)
            }
            SchemaError::UnknownEnumerationValue {
                enumeration,
                expected,
                ..
            } => format!("Use a known {}: {}", enumeration, expected.join(", ")),
            SchemaError::InvalidMapperPrefix { allowed, .. } => format!(
                "Start every mapper source path with one of: {}",
                allowed.join(", ")
            ),
            SchemaError::Io(_) => "Make sure the descriptor file exists and is readable".to_string(),
            SchemaError::DescriptorFormat { format, .. } => {
                format!("Make sure the file is valid {}", format)
            }
            // root_cause() never stops on a nested error
            SchemaError::NestedParseFailure { .. } => "Fix the nested entity".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
