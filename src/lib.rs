pub mod config;
pub mod core;
pub mod domain;
pub mod triggers;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::descriptor::{load_descriptor, load_service, parse_descriptor, DescriptorFormat};
pub use crate::core::{ExternalInteraction, Operation, ServiceInfo, UseCaseInfo};
pub use domain::enums::{Criticality, DeliverySemantic, ExternalInteractionType};
pub use triggers::{TriggerInfo, TriggerKind, TriggerOptions};
pub use utils::error::{ErrorKind, Location, Result, SchemaError};
