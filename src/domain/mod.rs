// Domain layer: the nurse entity and the ports (interfaces) the adapters implement.

pub mod model;
pub mod ports;
