// Domain layer: league records, derived rows and ports (interfaces).

pub mod model;
pub mod ports;
