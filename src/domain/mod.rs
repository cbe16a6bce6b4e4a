// Domain layer: view-model types and ports. The DOM is replaced by these plain structures.

pub mod model;
pub mod ports;
