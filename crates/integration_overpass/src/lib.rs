//! Nearby transport points of interest for Homerun
//!
//! Queries the [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
//! for bus stops, railway stations and halts, bike hire docks and taxi
//! ranks around a point.
//!
//! [`build_query`] produces the Overpass QL union; [`OverpassClient`] sends
//! it and returns the raw elements, implemented by [`HttpOverpassClient`].
//! Classification into stop kinds happens in the application layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_overpass::{HttpOverpassClient, OverpassClient, OverpassConfig};
//!
//! let client = HttpOverpassClient::new(&OverpassConfig::default())?;
//! let elements = client.nearby(51.5080, -0.1281).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod query;

pub use client::{HttpOverpassClient, OverpassClient};
pub use config::{OverpassConfig, SearchRadii};
pub use error::OverpassError;
pub use models::OverpassElement;
pub use query::build_query;
