//! Transit data models
//!
//! Typed itineraries as returned by the Transitous planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One travel option from origin to destination
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    /// Door-to-door duration in seconds
    pub duration_secs: f64,
    /// Total walking distance in meters
    pub walk_distance_m: f64,
    /// Number of vehicle changes
    pub transfers: u32,
    /// Legs in travel order
    pub legs: Vec<ItineraryLeg>,
}

/// A single ride or walk within an itinerary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItineraryLeg {
    /// Provider mode string (`WALK`, `BUS`, `RAIL`, ...)
    pub mode: Option<String>,
    /// Public line name
    pub route_short_name: Option<String>,
    /// Direction shown on the vehicle
    pub headsign: Option<String>,
    /// Departure time
    pub start_time: Option<DateTime<Utc>>,
    /// Arrival time
    pub end_time: Option<DateTime<Utc>>,
    /// Leg duration in seconds
    pub duration_secs: f64,
    /// Leg distance in meters
    pub distance_m: f64,
    /// Boarding place name
    pub from: Option<String>,
    /// Alighting place name
    pub to: Option<String>,
}

impl ItineraryLeg {
    /// Whether this leg is travelled on foot
    #[must_use]
    pub fn is_walking(&self) -> bool {
        self.mode
            .as_deref()
            .is_none_or(|mode| mode.eq_ignore_ascii_case("WALK") || mode.eq_ignore_ascii_case("FOOT"))
    }
}
