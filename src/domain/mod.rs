// Domain layer: shared entity fields, enumerations and ports to external collaborators.

pub mod entity;
pub mod enums;
pub mod ports;
