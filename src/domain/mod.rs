// Domain layer: core models and ports (interfaces). No external dependencies beyond
// serde/chrono for the wire shapes and async-trait for the port definitions.

pub mod model;
pub mod ports;
