// Domain layer: view-state models, wire-facing value types and the ports the
// screens depend on. No HTTP or terminal code lives here.

pub mod model;
pub mod ports;
