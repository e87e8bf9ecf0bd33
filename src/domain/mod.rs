// Domain layer: the scraped record and the browser ports the core drives.

pub mod model;
pub mod ports;
