//! Trigger kinds and their option shapes.
//!
//! A trigger is parsed from `{"type": "<kind>", "options": {...}}`. The kind
//! tag selects the options parser; the resulting [`TriggerOptions`] variant is
//! the only source of truth for the kind, so the two cannot disagree.

pub mod consumer;
pub mod http;
pub mod mapper;
pub mod schedule;
pub mod websocket;

use crate::utils::error::{Location, Result, SchemaError};
use crate::utils::validation::{as_mapping, Mapping};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use consumer::TriggerConsumer;
pub use http::{RateLimit, RateWindow, TriggerHttp};
pub use mapper::Mapper;
pub use schedule::TriggerSchedule;
pub use websocket::TriggerWebsocket;

const DEFAULT_TRIGGER_TYPE: &str = "http";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Http,
    Websocket,
    Consumer,
    Schedule,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 4] = [
        TriggerKind::Http,
        TriggerKind::Websocket,
        TriggerKind::Consumer,
        TriggerKind::Schedule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Http => "http",
            TriggerKind::Websocket => "websocket",
            TriggerKind::Consumer => "consumer",
            TriggerKind::Schedule => "schedule",
        }
    }

    /// Runs the options parser registered for this kind.
    pub fn parse_options(self, data: &Mapping) -> Result<TriggerOptions> {
        match self {
            TriggerKind::Http => TriggerHttp::from_mapping(data).map(TriggerOptions::Http),
            TriggerKind::Websocket => {
                TriggerWebsocket::from_mapping(data).map(TriggerOptions::Websocket)
            }
            TriggerKind::Consumer => {
                TriggerConsumer::from_mapping(data).map(TriggerOptions::Consumer)
            }
            TriggerKind::Schedule => {
                TriggerSchedule::from_mapping(data).map(TriggerOptions::Schedule)
            }
        }
    }
}

impl FromStr for TriggerKind {
    type Err = SchemaError;

    /// Exact, case-sensitive match on the canonical tag.
    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| SchemaError::UnknownEnumerationValue {
                enumeration: "trigger type",
                value: value.to_string(),
                expected: Self::ALL.iter().map(TriggerKind::as_str).collect(),
            })
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum TriggerOptions {
    Http(TriggerHttp),
    Websocket(TriggerWebsocket),
    Consumer(TriggerConsumer),
    Schedule(TriggerSchedule),
}

impl TriggerOptions {
    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerOptions::Http(_) => TriggerKind::Http,
            TriggerOptions::Websocket(_) => TriggerKind::Websocket,
            TriggerOptions::Consumer(_) => TriggerKind::Consumer,
            TriggerOptions::Schedule(_) => TriggerKind::Schedule,
        }
    }

    pub fn mapper(&self) -> Option<&Mapper> {
        match self {
            TriggerOptions::Http(http) => http.mapper.as_ref(),
            TriggerOptions::Websocket(ws) => ws.mapper.as_ref(),
            TriggerOptions::Consumer(consumer) => consumer.mapper.as_ref(),
            TriggerOptions::Schedule(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TriggerInfo {
    options: TriggerOptions,
}

impl TriggerInfo {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        let kind = match data.get("type") {
            None => TriggerKind::Http,
            Some(Value::String(tag)) if tag.is_empty() => {
                return Err(SchemaError::invalid_value(
                    "type",
                    "",
                    "Trigger type cannot be empty",
                ))
            }
            Some(Value::String(tag)) => tag.parse()?,
            Some(Value::Null) => {
                return Err(SchemaError::invalid_value(
                    "type",
                    "null",
                    format!("Trigger type cannot be empty (omit it to default to '{}')", DEFAULT_TRIGGER_TYPE),
                ))
            }
            Some(_) => return Err(SchemaError::invalid_type("type", "a string")),
        };

        let empty = Mapping::new();
        let options = match data.get("options") {
            None | Some(Value::Null) => &empty,
            Some(value) => as_mapping("options", value)
                .map_err(|e| e.within(Location::TriggerOptions(kind)))?,
        };

        let options = kind
            .parse_options(options)
            .map_err(|e| e.within(Location::TriggerOptions(kind)))?;
        tracing::trace!(kind = %kind, "parsed trigger");

        Ok(Self { options })
    }

    pub fn kind(&self) -> TriggerKind {
        self.options.kind()
    }

    pub fn options(&self) -> &TriggerOptions {
        &self.options
    }

    pub fn as_http(&self) -> Option<&TriggerHttp> {
        match &self.options {
            TriggerOptions::Http(http) => Some(http),
            _ => None,
        }
    }

    pub fn as_websocket(&self) -> Option<&TriggerWebsocket> {
        match &self.options {
            TriggerOptions::Websocket(ws) => Some(ws),
            _ => None,
        }
    }

    pub fn as_consumer(&self) -> Option<&TriggerConsumer> {
        match &self.options {
            TriggerOptions::Consumer(consumer) => Some(consumer),
            _ => None,
        }
    }

    pub fn as_schedule(&self) -> Option<&TriggerSchedule> {
        match &self.options {
            TriggerOptions::Schedule(schedule) => Some(schedule),
            _ => None,
        }
    }
}
