use crate::domain::enums::DeliverySemantic;
use crate::triggers::mapper::{parse_mapper, Mapper, EVENT_SOURCES};
use crate::utils::error::Result;
use crate::utils::validation::{
    expect_string, field, optional_count, optional_non_empty_string, required_string, Mapping,
};
use serde::Serialize;

/// Queue/topic consumer. Retry fields describe the broker setup; nothing
/// here retries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerConsumer {
    pub queue: String,
    pub partition: Option<String>,
    pub delivery_semantic: DeliverySemantic,
    pub max_retries: Option<u64>,
    pub retry_delay: Option<u64>,
    pub batch_size: Option<u64>,
    pub dead_letter_queue: Option<String>,
    pub mapper: Option<Mapper>,
}

impl TriggerConsumer {
    pub fn from_mapping(data: &Mapping) -> Result<Self> {
        let queue = required_string(data, "queue")?;
        let delivery_semantic = match field(data, "delivery_semantic") {
            Some(value) => DeliverySemantic::from_value(&expect_string("delivery_semantic", value)?)?,
            None => DeliverySemantic::default(),
        };

        Ok(Self {
            queue,
            partition: optional_non_empty_string(data, "partition")?,
            delivery_semantic,
            max_retries: optional_count(data, "max_retries")?,
            retry_delay: optional_count(data, "retry_delay")?,
            batch_size: optional_count(data, "batch_size")?,
            dead_letter_queue: optional_non_empty_string(data, "dead_letter_queue")?,
            mapper: parse_mapper(data, EVENT_SOURCES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SchemaError;
    use serde_json::{json, Value};

    fn parse(value: Value) -> Result<TriggerConsumer> {
        TriggerConsumer::from_mapping(value.as_object().unwrap())
    }

    #[test]
    fn test_consumer_options() {
        let consumer = parse(json!({
            "queue": "orders.created",
            "partition": "customer_id",
            "delivery_semantic": "exactly-once",
            "max_retries": 5,
            "retry_delay": 200,
            "batch_size": 10,
            "dead_letter_queue": "orders.dlq",
            "mapper": {"event.order": "order"}
        }))
        .unwrap();

        assert_eq!(consumer.queue, "orders.created");
        assert_eq!(consumer.partition.as_deref(), Some("customer_id"));
        assert_eq!(consumer.delivery_semantic, DeliverySemantic::ExactlyOnce);
        assert_eq!(consumer.max_retries, Some(5));
        assert_eq!(consumer.retry_delay, Some(200));
        assert_eq!(consumer.batch_size, Some(10));
        assert_eq!(consumer.dead_letter_queue.as_deref(), Some("orders.dlq"));
    }

    #[test]
    fn test_queue_required() {
        let err = parse(json!({"partition": "p"})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingRequiredField { ref field } if field == "queue"));
        assert_eq!(err.to_string(), "queue is required");
    }

    #[test]
    fn test_defaults_and_validation() {
        let consumer = parse(json!({"queue": "q"})).unwrap();
        assert_eq!(consumer.delivery_semantic, DeliverySemantic::AtLeastOnce);
        assert_eq!(consumer.mapper, None);

        assert!(matches!(
            parse(json!({"queue": "q", "partition": ""})),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            parse(json!({"queue": "q", "batch_size": -3})),
            Err(SchemaError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            parse(json!({"queue": "q", "delivery_semantic": "sometimes"})),
            Err(SchemaError::UnknownEnumerationValue { .. })
        ));
    }
}
