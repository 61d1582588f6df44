// Domain layer: league-night models and ports. No I/O here.

pub mod model;
pub mod night;
pub mod ports;
pub mod roster;
