use crate::core::use_case::UseCaseInfo;
use crate::domain::entity::EntityInfo;
use crate::domain::ports::UseCaseCoverage;
use crate::triggers::{TriggerInfo, TriggerKind};
use crate::utils::error::{Location, Result, SchemaError};
use crate::utils::validation::{as_mapping, field, optional_string, Mapping};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Root of a parsed descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    #[serde(flatten)]
    entity: EntityInfo,
    service_type: Option<String>,
    team: Option<String>,
    #[serde(serialize_with = "serialize_use_cases")]
    use_cases: Vec<(String, UseCaseInfo)>,
}

impl ServiceInfo {
    /// Parses a whole descriptor. Service tags are merged into every use case
    /// (use case tags win on collision). The first invalid use case aborts the
    /// parse with an error naming its key.
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        let entity = EntityInfo::from_mapping(data, None)?;
        let use_cases = parse_use_cases(field(data, "use_cases"), entity.tags())?;
        tracing::debug!(
            service = entity.name(),
            use_cases = use_cases.len(),
            "parsed service descriptor"
        );

        Ok(Self {
            service_type: optional_string(data, "service_type")?,
            team: optional_string(data, "team")?,
            entity,
            use_cases,
        })
    }

    /// Entry point for an already-decoded document of any shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_mapping(as_mapping("service descriptor", value)?)
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn description(&self) -> Option<&str> {
        self.entity.description()
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity.entity_type()
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        self.entity.tags()
    }

    pub fn service_type(&self) -> Option<&str> {
        self.service_type.as_deref()
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    /// Use cases in declaration order.
    pub fn use_cases(&self) -> impl Iterator<Item = (&str, &UseCaseInfo)> {
        self.use_cases
            .iter()
            .map(|(key, use_case)| (key.as_str(), use_case))
    }

    pub fn use_case(&self, key: &str) -> Option<&UseCaseInfo> {
        self.use_cases
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, use_case)| use_case)
    }

    pub fn use_case_keys(&self) -> Vec<&str> {
        self.use_cases.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Every trigger of `kind` with the key of the use case it belongs to.
    pub fn triggers_of_kind(&self, kind: TriggerKind) -> Vec<(&str, &TriggerInfo)> {
        self.use_cases()
            .flat_map(|(key, use_case)| {
                use_case
                    .triggers()
                    .iter()
                    .filter(move |trigger| trigger.kind() == kind)
                    .map(move |trigger| (key, trigger))
            })
            .collect()
    }

    /// Correlates declared use case keys with the keys of implementation
    /// metadata produced by a code inspector.
    pub fn reconcile<V>(&self, implemented: &HashMap<String, V>) -> UseCaseCoverage {
        let mut coverage = UseCaseCoverage::default();
        for key in self.use_case_keys() {
            if implemented.contains_key(key) {
                coverage.matched.push(key.to_string());
            } else {
                coverage.declared_only.push(key.to_string());
            }
        }
        let mut implemented_only: Vec<String> = implemented
            .keys()
            .filter(|key| self.use_case(key).is_none())
            .cloned()
            .collect();
        implemented_only.sort();
        coverage.implemented_only = implemented_only;
        coverage
    }
}

fn parse_use_cases(
    value: Option<&Value>,
    service_tags: &HashMap<String, String>,
) -> Result<Vec<(String, UseCaseInfo)>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let entries = as_mapping("use_cases", value)?;

    let mut use_cases = Vec::with_capacity(entries.len());
    for (key, data) in entries {
        let data = data
            .as_object()
            .ok_or_else(|| SchemaError::invalid_type(format!("use_cases.{}", key), "a mapping"))?;
        let use_case = UseCaseInfo::from_mapping_with_tags(data, Some(service_tags))
            .map_err(|e| e.within(Location::UseCase(key.clone())))?;
        tracing::debug!(
            use_case = %key,
            triggers = use_case.triggers().len(),
            criticality = %use_case.criticality(),
            "parsed use case"
        );
        use_cases.push((key.clone(), use_case));
    }
    Ok(use_cases)
}

fn serialize_use_cases<S: Serializer>(
    use_cases: &[(String, UseCaseInfo)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(use_cases.len()))?;
    for (key, use_case) in use_cases {
        map.serialize_entry(key, use_case)?;
    }
    map.end()
}
