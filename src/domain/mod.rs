// Domain layer: deploy model and ports (interfaces). No process or file system access here.

pub mod model;
pub mod ports;
