pub mod coercion;
pub mod projection;
