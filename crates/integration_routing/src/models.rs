//! Routing data models

use std::fmt;

use serde::{Deserialize, Serialize};

/// OSRM routing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteProfile {
    /// Foot network
    Walking,
    /// Car network
    Driving,
    /// Bicycle network
    Cycling,
}

impl RouteProfile {
    /// Profile segment of the request path
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The best route returned for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetPath {
    /// Travel time in seconds
    pub duration_secs: f64,
    /// Distance in meters
    pub distance_m: f64,
    /// Line geometry as `[lon, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
    /// Steps of all legs in travel order
    pub steps: Vec<RouteStep>,
}

/// A single turn instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Maneuver type (`depart`, `turn`, `arrive`, ...)
    pub maneuver_type: String,
    /// Maneuver modifier (`left`, `slight right`, ...)
    pub modifier: Option<String>,
    /// Name of the way the step travels along
    pub name: Option<String>,
    /// Step duration in seconds
    pub duration_secs: f64,
    /// Step distance in meters
    pub distance_m: f64,
}
