//! Public transit integration for Homerun
//!
//! Provides public transit itineraries via the [Transitous](https://transitous.org)
//! journey planner and place search via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern of the other integration crates.
//! [`TransitClient`] plans itineraries and is implemented by [`TransitousClient`].
//! [`GeocodingClient`] handles place search and reverse lookups via
//! [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{TransitClient, TransitConfig, TransitousClient};
//!
//! let config = TransitConfig::default();
//! let client = TransitousClient::new(&config)?;
//!
//! let itineraries = client.plan(
//!     (51.5080, -0.1281), // Trafalgar Square
//!     (51.5303, -0.1238), // King's Cross
//!     None,               // depart now
//! ).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{TransitClient, TransitousClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use geocoding::{
    GeocodeResult, GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
pub use models::{Itinerary, ItineraryLeg};
