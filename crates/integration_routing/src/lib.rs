//! Street routing integration for Homerun
//!
//! Point-to-point routing for walking, driving and cycling through the
//! [OSRM](https://project-osrm.org) HTTP API.
//!
//! [`RoutingClient`] defines the interface, implemented by
//! [`OsrmRoutingClient`]. Results carry the total duration and distance,
//! the full GeoJSON line geometry and the turn-by-turn steps of every leg.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OsrmRoutingClient, RouteProfile, RoutingClient, RoutingConfig};
//!
//! let client = OsrmRoutingClient::new(&RoutingConfig::default())?;
//! let route = client
//!     .route(RouteProfile::Walking, (51.5080, -0.1281), (51.5303, -0.1238))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use models::{RouteProfile, RouteStep, StreetPath};
