//! Geo utilities
//!
//! Pure helpers shared by the aggregator, the stop classifier and the
//! presentation layer: great-circle distance, human-readable durations and
//! distances, and the taxi fare model.

use std::fmt;

use serde::{Serialize, Serializer};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per statute mile
pub const METERS_PER_MILE: f64 = 1609.34;

/// Placeholder rendered for missing or meaningless values
pub const NO_VALUE: &str = "—";

/// Great-circle distance between two points in meters (Haversine formula)
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (lat1.to_radians().cos() * lat2.to_radians().cos()).mul_add(
        (delta_lon / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    )
    // rounding can push near-antipodal points just past 1
    .min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Format a duration in seconds as `"12m"`, `"1h"` or `"1h 30m"`
///
/// Zero, negative, NaN and infinite inputs render as `"—"`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return NO_VALUE.to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (seconds / 60.0).round() as u64;
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let rem = minutes % 60;
    if rem == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rem}m")
    }
}

/// Format a distance in meters as `"450m"` or `"3.2km"`
///
/// Zero, negative, NaN and infinite inputs render as `"—"`.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters <= 0.0 {
        return NO_VALUE.to_string();
    }
    if meters < 1000.0 {
        return format!("{}m", meters.round());
    }
    format!("{:.1}km", meters / 1000.0)
}

/// Format a distance in meters as miles with one decimal, e.g. `"3.1mi"`
#[must_use]
pub fn format_distance_miles(meters: f64) -> String {
    format!("{:.1}mi", meters / METERS_PER_MILE)
}

/// A taxi fare range in whole pounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareEstimate {
    /// Lower bound
    pub low: u32,
    /// Upper bound
    pub high: u32,
}

impl fmt::Display for FareEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}–£{}", self.low, self.high)
    }
}

impl Serialize for FareEstimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Estimate a metered taxi fare for a trip of `meters`
///
/// Flag fall of £2.80 plus £2.30 per mile, widened to a -15% / +30% range.
/// The lower bound never drops below the £4 minimum fare.
#[must_use]
pub fn taxi_fare_estimate(meters: f64) -> FareEstimate {
    const FLAG_FALL: f64 = 2.8;
    const PER_MILE: f64 = 2.3;
    const MINIMUM_FARE: u32 = 4;

    let miles = meters.max(0.0) / METERS_PER_MILE;
    let metered = PER_MILE.mul_add(miles, FLAG_FALL);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let low = ((metered * 0.85).floor() as u32).max(MINIMUM_FARE);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let high = (metered * 1.3).ceil() as u32;

    FareEstimate { low, high }
}
