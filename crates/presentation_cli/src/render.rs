//! Plain-text rendering of routes, stops and places

use application::RouteSet;
use domain::{
    Location, Route, StopIndex, StopKind, format_distance, format_distance_miles, format_duration,
};

/// Distance unit used in output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Meters and kilometers
    #[default]
    Metric,
    /// Miles
    Imperial,
}

impl Units {
    fn distance(self, meters: f64) -> String {
        match self {
            Self::Metric => format_distance(meters),
            Self::Imperial if meters.is_finite() && meters > 0.0 => format_distance_miles(meters),
            Self::Imperial => format_distance(meters),
        }
    }
}

/// Options for route output
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteView {
    /// Distance unit
    pub units: Units,
    /// Include per-step instructions
    pub steps: bool,
}

/// Header line of a trip
pub fn render_trip(from: &Location, to: &Location) -> String {
    format!("{} → {}\n", from.name(), to.name())
}

/// Ranked routes, one card per route
pub fn render_routes(routes: &RouteSet, view: RouteView) -> String {
    let mut out = String::new();
    for route in routes {
        out.push_str(&render_route(route, view));
    }
    if routes.is_total_failure() {
        out.push_str("No routes found between these places.\n");
    }
    out
}

fn render_route(route: &Route, view: RouteView) -> String {
    if route.unavailable {
        return format!("{} {}  unavailable · {}\n", route.icon, route.label, route.summary);
    }

    let mut out = format!(
        "{} {}  {} · {}{}\n",
        route.icon,
        route.label,
        format_duration(route.duration_secs),
        view.units.distance(route.distance_m),
        if route.fastest { "  ⚡ fastest" } else { "" },
    );
    out.push_str(&format!("   {}\n", route.summary));

    if let Some(fare) = &route.cost_estimate {
        out.push_str(&format!("   est. fare {fare}\n"));
    }
    if let Some(transfers) = route.transfers {
        let plural = if transfers == 1 { "" } else { "s" };
        out.push_str(&format!("   {transfers} transfer{plural}\n"));
    }

    if route.legs.len() > 1 {
        for leg in &route.legs {
            out.push_str(&format!(
                "   {} {}  {}\n",
                leg.icon,
                leg.label,
                format_duration(leg.duration_secs)
            ));
        }
    }

    if view.steps {
        for step in &route.steps {
            if step.meta.is_empty() {
                out.push_str(&format!("     {} {}\n", step.icon, step.action));
            } else {
                out.push_str(&format!("     {} {}  ({})\n", step.icon, step.action, step.meta));
            }
        }
    }
    out
}

/// Nearby stops grouped by kind, nearest first
pub fn render_stops(stops: &StopIndex, units: Units) -> String {
    if stops.is_empty() {
        return "No transport nearby.\n".to_string();
    }

    let mut out = String::new();
    for kind in StopKind::ALL {
        let bucket = stops.bucket(kind);
        if bucket.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", kind_heading(kind)));
        for stop in bucket {
            let detail = stop
                .routes
                .as_deref()
                .or(stop.lines.as_deref())
                .or(stop.network.as_deref())
                .map(|d| format!("  {d}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {} {}  {}{detail}\n",
                stop.icon,
                stop.label,
                units.distance(stop.dist_m)
            ));
        }
    }
    out
}

const fn kind_heading(kind: StopKind) -> &'static str {
    match kind {
        StopKind::Bus => "Bus stops",
        StopKind::Train => "Stations",
        StopKind::Bike => "Cycle hire",
        StopKind::Taxi => "Taxi ranks",
    }
}

/// One place with its coordinates
pub fn render_location(location: &Location) -> String {
    format!("{}  ({:.5}, {:.5})\n", location.name(), location.lat(), location.lon())
}

/// Numbered search candidates
pub fn render_locations(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "No matching places.\n".to_string();
    }
    locations
        .iter()
        .enumerate()
        .map(|(i, location)| format!("{}. {}", i + 1, render_location(location)))
        .collect()
}
