//! Value Objects - Immutable, identity-less domain primitives

mod location;
mod polyline;
mod travel_mode;

pub use location::{InvalidCoordinates, Location, coordinate_label};
pub use polyline::Polyline;
pub use travel_mode::{LegMode, ModeStyle, TravelMode};
