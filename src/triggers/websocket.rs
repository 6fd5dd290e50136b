use crate::triggers::mapper::{parse_mapper, Mapper, EVENT_SOURCES};
use crate::utils::error::Result;
use crate::utils::validation::{optional_string, Mapping};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriggerWebsocket {
    pub route_key: Option<String>,
    pub mapper: Option<Mapper>,
}

impl TriggerWebsocket {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        Ok(Self {
            route_key: optional_string(data, "routeKey")?,
            mapper: parse_mapper(data, EVENT_SOURCES)?,
        })
    }
}
