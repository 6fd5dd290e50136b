use crate::core::external_interaction::ExternalInteraction;
use crate::domain::entity::EntityInfo;
use crate::domain::enums::Criticality;
use crate::triggers::TriggerInfo;
use crate::utils::error::{Location, Result, SchemaError};
use crate::utils::validation::{as_mapping, field, optional_string, Mapping};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseCaseInfo {
    #[serde(flatten)]
    entity: EntityInfo,
    triggers: Vec<TriggerInfo>,
    criticality: Criticality,
    actor: Option<String>,
    external_interactions: Vec<ExternalInteraction>,
}

impl UseCaseInfo {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        Self::from_mapping_with_tags(data, None)
    }

    /// Same as [`from_mapping`](Self::from_mapping) with `inherited_tags`
    /// overlaid by the use case's own tags.
    pub fn from_mapping_with_tags(
        data: &Mapping,
        inherited_tags: Option<&HashMap<String, String>>,
    ) -> Result<Self> {
        let entity = EntityInfo::from_mapping(data, inherited_tags)?;
        let triggers = parse_triggers(field(data, "triggers"))?;
        let criticality = field(data, "criticality")
            .map(Criticality::resolve)
            .transpose()?
            .unwrap_or_default();
        let external_interactions = parse_external_interactions(field(data, "external_interactions"))?;

        Ok(Self {
            entity,
            triggers,
            criticality,
            actor: optional_string(data, "actor")?,
            external_interactions,
        })
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

    pub fn triggers(&self) -> &[TriggerInfo] {
        &self.triggers
    }

    pub fn criticality(&self) -> Criticality {
        self.criticality
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    pub fn external_interactions(&self) -> &[ExternalInteraction] {
        &self.external_interactions
    }

    pub fn external_interaction(&self, keyname: &str) -> Option<&ExternalInteraction> {
        self.external_interactions
            .iter()
            .find(|interaction| interaction.keyname() == keyname)
    }
}

fn parse_triggers(value: Option<&Value>) -> Result<Vec<TriggerInfo>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::invalid_type("triggers", "a list"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            as_mapping("trigger", item)
                .and_then(TriggerInfo::from_mapping)
                .map_err(|e| e.within(Location::Trigger(index)))
        })
        .collect()
}

/// Accepts a list of interactions or a mapping keyed by keyname.
fn parse_external_interactions(value: Option<&Value>) -> Result<Vec<ExternalInteraction>> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                as_mapping("external interaction", item)
                    .and_then(|data| ExternalInteraction::from_mapping(data, None))
                    .map_err(|e| e.within(Location::ExternalInteraction(index)))
            })
            .collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(key, item)| {
                as_mapping("external interaction", item)
                    .and_then(|data| ExternalInteraction::from_mapping(data, Some(key.as_str())))
                    .map_err(|e| e.within(Location::ExternalInteractionKey(key.clone())))
            })
            .collect(),
        Some(_) => Err(SchemaError::invalid_type(
            "external_interactions",
            "a list or a mapping",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::TriggerKind;
    use crate::utils::error::ErrorKind;
    use serde_json::json;

    fn parse(value: Value) -> Result<UseCaseInfo> {
        UseCaseInfo::from_mapping(value.as_object().unwrap())
    }

    #[test]
    fn test_full_use_case() {
        let use_case = parse(json!({
            "name": "Create Order",
            "description": "Handles order creation",
            "type": "command",
            "tags": {"priority": "high"},
            "actor": "customer",
            "criticality": "high",
            "triggers": [
                {"type": "http", "options": {"method": "POST", "path": "/orders"}},
                {"type": "consumer", "options": {"queue": "orders.requested"}}
            ],
            "external_interactions": [
                {"keyname": "orders_db", "type_interaction": "database", "operation": "insert_order"}
            ]
        }))
        .unwrap();

        assert_eq!(use_case.name(), "Create Order");
        assert_eq!(use_case.description(), Some("Handles order creation"));
        assert_eq!(use_case.entity_type(), Some("command"));
        assert_eq!(use_case.actor(), Some("customer"));
        assert_eq!(use_case.criticality(), Criticality::High);
        assert_eq!(use_case.triggers().len(), 2);
        assert_eq!(use_case.triggers()[1].kind(), TriggerKind::Consumer);
        assert!(use_case.external_interaction("orders_db").is_some());
    }

    #[test]
    fn test_defaults() {
        let use_case = parse(json!({"name": "Ping"})).unwrap();
        assert_eq!(use_case.criticality(), Criticality::Medium);
        assert!(use_case.triggers().is_empty());
        assert!(use_case.external_interactions().is_empty());
        assert!(use_case.tags().is_empty());
        assert_eq!(use_case.actor(), None);
    }

    #[test]
    fn test_name_required() {
        assert!(matches!(
            parse(json!({"description": "no name"})),
            Err(SchemaError::MissingRequiredField { ref field }) if field == "name"
        ));
        assert!(matches!(
            parse(json!({"name": 123})),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_trigger_failure_carries_index() {
        let err = parse(json!({
            "name": "Sync",
            "triggers": [
                {"type": "schedule", "options": {"cronjob": "0 * * * *"}},
                {"type": "schedule", "options": {}}
            ]
        }))
        .unwrap_err();

        assert_eq!(
            err.path(),
            vec![&Location::Trigger(1), &Location::TriggerOptions(TriggerKind::Schedule)]
        );
        assert_eq!(err.root_cause().kind(), ErrorKind::MissingRequiredField);
    }

    #[test]
    fn test_triggers_must_be_list() {
        let err = parse(json!({"name": "x", "triggers": {"type": "http"}})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFieldType { ref field, .. } if field == "triggers"));
    }

    #[test]
    fn test_interactions_list_and_mapping_are_equivalent() {
        let payload = json!({"type_interaction": "db", "operation": ["read", "write"], "desc": "orders"});
        let mut listed = payload.clone();
        listed["keyname"] = json!("orders_db");

        let from_list = parse(json!({"name": "x", "external_interactions": [listed]})).unwrap();
        let from_map = parse(json!({"name": "x", "external_interactions": {"orders_db": payload}})).unwrap();

        assert_eq!(from_list.external_interactions(), from_map.external_interactions());
    }

    #[test]
    fn test_interaction_failures_carry_context() {
        let by_index = parse(json!({"name": "x", "external_interactions": [{"keyname": "a"}, {}]})).unwrap_err();
        assert_eq!(by_index.path(), vec![&Location::ExternalInteraction(1)]);

        let by_key = parse(json!({"name": "x", "external_interactions": {"mailer": {"operation": 3}}})).unwrap_err();
        assert_eq!(
            by_key.path(),
            vec![&Location::ExternalInteractionKey("mailer".to_string())]
        );
        assert_eq!(by_key.root_cause().kind(), ErrorKind::InvalidFieldType);
    }

    #[test]
    fn test_interactions_shape() {
        let err = parse(json!({"name": "x", "external_interactions": "db"})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidFieldType { ref field, .. } if field == "external_interactions"
        ));
    }

    #[test]
    fn test_invalid_criticality() {
        assert!(matches!(
            parse(json!({"name": "x", "criticality": "urgent"})),
            Err(SchemaError::UnknownEnumerationValue { .. })
        ));
        assert!(matches!(
            parse(json!({"name": "x", "criticality": true})),
            Err(SchemaError::InvalidFieldType { .. })
        ));
    }
}
