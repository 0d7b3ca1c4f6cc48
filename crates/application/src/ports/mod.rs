//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod home_store_port;
mod poi_port;
mod routing_port;
mod transit_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodeCandidate, GeocodingPort};
#[cfg(test)]
pub use home_store_port::MockHomeStorePort;
pub use home_store_port::HomeStorePort;
#[cfg(test)]
pub use poi_port::MockPoiQueryPort;
pub use poi_port::{GeoElement, PoiQueryPort};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{Maneuver, RoutingPort, RoutingProfile, StreetRoute};
#[cfg(test)]
pub use transit_port::MockTransitPort;
pub use transit_port::{TransitItinerary, TransitLegData, TransitPort};
