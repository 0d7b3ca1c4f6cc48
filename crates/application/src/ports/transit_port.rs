//! Public transit itinerary port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::Location;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One leg of a transit itinerary as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitLegData {
    /// Provider mode string, e.g. `BUS`, `RAIL`, `WALK`
    pub mode: Option<String>,
    /// Public line name, e.g. `73`
    pub route_short_name: Option<String>,
    /// Direction shown on the vehicle
    pub headsign: Option<String>,
    /// Leg duration in seconds
    pub duration_secs: f64,
    /// Leg distance in meters
    pub distance_m: f64,
    /// Boarding place
    pub from: Option<String>,
    /// Alighting place
    pub to: Option<String>,
}

/// A complete transit itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitItinerary {
    /// Door-to-door duration in seconds
    pub duration_secs: f64,
    /// Total walking distance in meters
    pub walk_distance_m: f64,
    /// Number of vehicle changes
    pub transfers: u32,
    /// Legs in travel order
    pub legs: Vec<TransitLegData>,
}

/// Port for transit journey planning
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Itineraries between two locations in provider order
    ///
    /// `departure` defaults to now. An empty list means no itinerary.
    async fn plan(
        &self,
        from: &Location,
        to: &Location,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<TransitItinerary>, ApplicationError>;
}
