//! Named geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::haversine_distance;

/// A named point on the map (trip origin, destination, or home)
///
/// Locations are plain values: two locations describe the same place when
/// their coordinates are close, regardless of name. See [`Location::is_near`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees (-90 to 90)
    lat: f64,
    /// Longitude in degrees (-180 to 180)
    lon: f64,
    /// Display name
    name: String,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl Location {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well)
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            lat,
            lon,
            name: name.into(),
        })
    }

    /// Create a location without validation (for trusted sources)
    #[must_use]
    pub fn new_unchecked(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
        }
    }

    /// Create a location named after its own coordinates
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` for out-of-range values.
    pub fn from_coordinates(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        Self::new(lat, lon, coordinate_label(lat, lon))
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Get the display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a copy of this location with a different display name
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            lat: self.lat,
            lon: self.lon,
            name: name.into(),
        }
    }

    /// Great-circle distance to another location in meters
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Whether `other` lies within `tolerance_m` meters of this location
    #[must_use]
    pub fn is_near(&self, other: &Self, tolerance_m: f64) -> bool {
        self.distance_to(other) <= tolerance_m
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6}, {:.6})", self.name, self.lat, self.lon)
    }
}

/// Label used for a point that has no known name, e.g. `"51.50740, -0.12780"`
#[must_use]
pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{lat:.5}, {lon:.5}")
}
