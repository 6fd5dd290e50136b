pub mod external_interaction;
pub mod service;
pub mod use_case;

pub use external_interaction::{ExternalInteraction, Operation};
pub use service::ServiceInfo;
pub use use_case::UseCaseInfo;
