// Domain layer: inventory model and ports (interfaces). No external dependencies beyond serde and tracing.

pub mod directory;
pub mod model;
pub mod ports;
