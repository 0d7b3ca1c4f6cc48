//! Route geometry

use serde::{Deserialize, Serialize};

use crate::geo::haversine_distance;

/// A line on the map as `[lon, lat]` pairs (GeoJSON coordinate order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline(Vec<[f64; 2]>);

impl Polyline {
    /// Create a polyline from `[lon, lat]` pairs
    #[must_use]
    pub const fn new(points: Vec<[f64; 2]>) -> Self {
        Self(points)
    }

    /// The `[lon, lat]` pairs
    #[must_use]
    pub fn points(&self) -> &[[f64; 2]] {
        &self.0
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length along the line in meters
    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.0
            .windows(2)
            .map(|pair| haversine_distance(pair[0][1], pair[0][0], pair[1][1], pair[1][0]))
            .sum()
    }
}
