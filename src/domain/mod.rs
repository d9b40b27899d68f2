// Domain layer: backup models and the archiver port.

pub mod model;
pub mod ports;
