//! Nearby stop classification
//!
//! Precedence is rail, then bus, then bike hire, then taxi. The first kind
//! whose tag rule matches wins; elements matching none are dropped.

use domain::{Location, Stop, StopIndex, StopKind, haversine_distance};

use crate::ports::GeoElement;

/// Classify raw elements into capped, distance-sorted stop buckets
pub fn classify(elements: &[GeoElement], origin: &Location) -> StopIndex {
    StopIndex::from_stops(
        elements
            .iter()
            .filter_map(|element| classify_element(element, origin)),
    )
}

/// Kind of stop an element represents, if any
pub fn element_kind(element: &GeoElement) -> Option<StopKind> {
    if element.has_tag("railway", "station") || element.has_tag("railway", "halt") {
        Some(StopKind::Train)
    } else if element.has_tag("highway", "bus_stop") || element.has_tag("bus", "yes") {
        Some(StopKind::Bus)
    } else if element.has_tag("amenity", "bicycle_rental") {
        Some(StopKind::Bike)
    } else if element.has_tag("amenity", "taxi") {
        Some(StopKind::Taxi)
    } else {
        None
    }
}

fn classify_element(element: &GeoElement, origin: &Location) -> Option<Stop> {
    let lat = element.lat.filter(|v| v.is_finite())?;
    let lon = element.lon.filter(|v| v.is_finite())?;
    let kind = element_kind(element)?;

    let label = element
        .tag("name")
        .or_else(|| element.tag("ref"))
        .unwrap_or_else(|| kind.default_label())
        .to_string();

    let detail = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| element.tag(key))
            .map(str::to_string)
    };

    let mut stop = Stop {
        id: element.id,
        lat,
        lon,
        dist_m: haversine_distance(origin.lat(), origin.lon(), lat, lon),
        kind,
        icon: kind.icon(),
        label,
        routes: None,
        lines: None,
        network: None,
    };
    match kind {
        StopKind::Train => stop.lines = detail(&["railway:ref", "operator"]),
        StopKind::Bus => stop.routes = detail(&["route_ref", "ref"]),
        StopKind::Bike => stop.network = detail(&["network"]),
        StopKind::Taxi => {}
    }
    Some(stop)
}
