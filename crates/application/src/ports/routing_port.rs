//! Street routing port
//!
//! Point-to-point routing for walking, driving and cycling.

use std::fmt;

use async_trait::async_trait;
use domain::{Location, Polyline};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Street network profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    /// Pedestrian network
    Walking,
    /// Road network for cars
    Driving,
    /// Cycle network
    Cycling,
}

impl RoutingProfile {
    /// Profile name as used in routing URLs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn instruction of a street route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    /// Maneuver type, e.g. `turn`, `new name`, `arrive`
    pub kind: String,
    /// Direction modifier, e.g. `left`, `slight right`
    pub modifier: Option<String>,
    /// Street the maneuver leads onto
    pub street: Option<String>,
    /// Seconds until the next maneuver
    pub duration_secs: f64,
    /// Meters until the next maneuver
    pub distance_m: f64,
}

impl Maneuver {
    /// Whether this is the final arrival maneuver
    #[must_use]
    pub fn is_arrival(&self) -> bool {
        self.kind == "arrive"
    }
}

/// Normalised routing result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetRoute {
    /// Total travel time in seconds
    pub duration_secs: f64,
    /// Total distance in meters
    pub distance_m: f64,
    /// Path drawn on the map
    pub geometry: Option<Polyline>,
    /// Turn-by-turn maneuvers across all legs
    pub maneuvers: Vec<Maneuver>,
}

/// Port for point-to-point street routing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fastest route between two locations for a profile
    ///
    /// Returns `NotFound` when the provider has no route.
    async fn route(
        &self,
        profile: RoutingProfile,
        from: &Location,
        to: &Location,
    ) -> Result<StreetRoute, ApplicationError>;
}
