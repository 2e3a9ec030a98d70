/// Service layer
pub mod geo;
pub mod tz;

pub use geo::{GeoResolver, ResolvedLocation};
