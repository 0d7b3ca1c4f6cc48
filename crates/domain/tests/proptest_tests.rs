//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::geo::{format_distance, format_duration, haversine_distance, taxi_fare_estimate};
use domain::{Location, ShareLink};
use proptest::prelude::*;

// ============================================================================
// Haversine Property Tests
// ============================================================================

mod haversine_tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_is_symmetric_and_non_negative(
            lat1 in -89.0f64..=89.0f64,
            lon1 in -179.0f64..=179.0f64,
            lat2 in -89.0f64..=89.0f64,
            lon2 in -179.0f64..=179.0f64
        ) {
            let ab = haversine_distance(lat1, lon1, lat2, lon2);
            let ba = haversine_distance(lat2, lon2, lat1, lon1);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(haversine_distance(lat, lon, lat, lon).abs() < 1e-6);
        }

        #[test]
        fn distance_bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let d = haversine_distance(lat1, lon1, lat2, lon2);
            prop_assert!(d <= std::f64::consts::PI * 6_371_000.0 + 1.0);
        }
    }
}

// ============================================================================
// Formatting Property Tests
// ============================================================================

mod formatting_tests {
    use super::*;

    proptest! {
        #[test]
        fn short_durations_render_minutes(seconds in 1.0f64..3569.0f64) {
            let text = format_duration(seconds);
            prop_assert!(text.ends_with('m'));
            prop_assert!(!text.contains('h'));
        }

        #[test]
        fn long_durations_render_hours(seconds in 3570.0f64..1_000_000.0f64) {
            let text = format_duration(seconds);
            prop_assert!(text.contains('h'));
        }

        #[test]
        fn short_distances_render_meters(meters in 0.001f64..999.0f64) {
            let text = format_distance(meters);
            prop_assert!(text.ends_with('m'));
            prop_assert!(!text.ends_with("km"));
        }

        #[test]
        fn long_distances_render_kilometers(meters in 1000.0f64..1_000_000.0f64) {
            prop_assert!(format_distance(meters).ends_with("km"));
        }

        #[test]
        fn fare_range_is_ordered(meters in 0.0f64..200_000.0f64) {
            let fare = taxi_fare_estimate(meters);
            prop_assert!(fare.low >= 4);
            prop_assert!(fare.low <= fare.high);
        }
    }
}

// ============================================================================
// Share Link Property Tests
// ============================================================================

mod share_link_tests {
    use super::*;

    proptest! {
        #[test]
        fn share_link_roundtrip(
            flat in -90.0f64..=90.0f64,
            flon in -180.0f64..=180.0f64,
            tlat in -90.0f64..=90.0f64,
            tlon in -180.0f64..=180.0f64,
            fname in "[A-Za-z0-9 ,&'=+?#%-]{1,40}",
            tname in "\\PC{1,20}"
        ) {
            let from = Location::new(flat, flon, fname.clone()).unwrap();
            let to = Location::new(tlat, tlon, tname.clone()).unwrap();
            let parsed = ShareLink::parse(&ShareLink::new(Some(from), Some(to)).to_query());

            let from = parsed.from.unwrap();
            let to = parsed.to.unwrap();
            prop_assert!((from.lat() - flat).abs() <= 5e-7);
            prop_assert!((from.lon() - flon).abs() <= 5e-7);
            prop_assert!((to.lat() - tlat).abs() <= 5e-7);
            prop_assert!((to.lon() - tlon).abs() <= 5e-7);
            prop_assert_eq!(from.name(), fname.as_str());
            prop_assert_eq!(to.name(), tname.as_str());
        }
    }
}
