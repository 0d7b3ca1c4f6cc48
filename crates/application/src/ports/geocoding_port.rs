//! Geocoding port
//!
//! Forward search of free text and reverse lookup of coordinates.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place matching a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Full display name, comma separated from specific to general
    pub display_name: String,
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search places by free text, best match first
    async fn search(
        &self,
        text: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError>;

    /// Display name of the place at the given coordinates
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, ApplicationError>;
}
