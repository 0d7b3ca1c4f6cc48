//! Domain layer for Homerun
//!
//! Contains the canonical journey model (routes, legs, steps), nearby stop
//! model, geo utilities, and the share link codec. This layer performs no
//! I/O.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod share_link;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geo::{
    FareEstimate, format_distance, format_distance_miles, format_duration, haversine_distance,
    taxi_fare_estimate,
};
pub use share_link::ShareLink;
pub use value_objects::*;
