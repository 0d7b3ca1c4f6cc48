//! Canonical route representation
//!
//! Every provider result, whatever its wire shape, ends up as a [`Route`]
//! made of [`Leg`]s (what you travel on) and [`Step`]s (what you do).

use serde::Serialize;

use crate::geo::FareEstimate;
use crate::value_objects::{LegMode, ModeStyle, Polyline, TravelMode};

/// One candidate end-to-end journey in a single travel mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Identifier, unique within one result set
    pub id: String,
    /// Travel mode
    pub mode: TravelMode,
    /// Card title (e.g. "Walking", "Transit (alt)")
    pub label: String,
    /// Emoji icon
    pub icon: &'static str,
    /// CSS hex colour
    pub color: &'static str,
    /// Total duration in seconds (`f64::INFINITY` when unavailable)
    pub duration_secs: f64,
    /// Total distance in meters
    pub distance_m: f64,
    /// Drawable geometry, if the provider returned one
    pub geometry: Option<Polyline>,
    /// Mode-homogeneous segments in travel order
    pub legs: Vec<Leg>,
    /// Turn-by-turn or per-leg instructions
    pub steps: Vec<Step>,
    /// One-line description
    pub summary: String,
    /// Provider failed or found nothing
    pub unavailable: bool,
    /// Fastest available route of its result set
    pub fastest: bool,
    /// Number of vehicle changes (transit only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfers: Option<u32>,
    /// Fare range (taxi only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<FareEstimate>,
}

impl Route {
    /// Placeholder shown when a mode has no usable result
    #[must_use]
    pub fn unavailable(id: impl Into<String>, mode: TravelMode, summary: impl Into<String>) -> Self {
        let style = mode.style();
        Self {
            id: id.into(),
            mode,
            label: mode.route_label().to_string(),
            icon: style.icon,
            color: style.color,
            duration_secs: f64::INFINITY,
            distance_m: 0.0,
            geometry: None,
            legs: Vec::new(),
            steps: Vec::new(),
            summary: summary.into(),
            unavailable: true,
            fastest: false,
            transfers: None,
            cost_estimate: None,
        }
    }

    /// Whether this route can be offered to the user
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.unavailable
    }
}

/// A mode-homogeneous segment of a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    /// Leg mode
    pub mode: LegMode,
    /// Emoji icon
    pub icon: &'static str,
    /// CSS hex colour
    pub color: &'static str,
    /// Display label (e.g. "Walk", "73 → Stoke Newington")
    pub label: String,
    /// Duration in seconds, never negative
    pub duration_secs: f64,
    /// Distance in meters, never negative
    pub distance_m: f64,
    /// Boarding place name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Alighting place name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Leg {
    /// Create a leg styled after its mode
    ///
    /// Negative or NaN durations and distances are clamped to zero.
    #[must_use]
    pub fn new(mode: LegMode, label: impl Into<String>, duration_secs: f64, distance_m: f64) -> Self {
        let style = mode.style();
        Self {
            mode,
            icon: style.icon,
            color: style.color,
            label: label.into(),
            duration_secs: non_negative(duration_secs),
            distance_m: non_negative(distance_m),
            from: None,
            to: None,
        }
    }

    /// Set the boarding and alighting place names
    #[must_use]
    pub fn between(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// One instruction within a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Emoji icon
    pub icon: &'static str,
    /// CSS hex colour
    pub color: &'static str,
    /// Instruction text (e.g. "Turn left onto Strand")
    pub action: String,
    /// Secondary text, usually "duration · distance"
    pub meta: String,
    /// Start place name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End place name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Step {
    /// Create a step with the given style
    #[must_use]
    pub fn new(style: ModeStyle, action: impl Into<String>, meta: impl Into<String>) -> Self {
        Self {
            icon: style.icon,
            color: style.color,
            action: action.into(),
            meta: meta.into(),
            from: None,
            to: None,
        }
    }

    /// The fixed final step of street routes
    #[must_use]
    pub fn arrive() -> Self {
        Self::new(ModeStyle::ARRIVE, "Arrive at destination", "")
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
