// Domain layer: the data model shared by the rewrite engine and the ports it talks through.

pub mod model;
pub mod ports;
