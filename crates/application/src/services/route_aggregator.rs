//! Route aggregation
//!
//! Turns the four provider outcomes of one planning request into a ranked
//! list of route candidates. Rejected providers are suppressed, never fatal:
//! street modes are omitted and transit collapses into a single placeholder.

use std::fmt;

use domain::{
    Leg, LegMode, Location, ModeStyle, Route, Step, TravelMode, format_distance, format_duration,
    taxi_fare_estimate,
};
use serde::Serialize;
use thiserror::Error;

use crate::ports::{Maneuver, StreetRoute, TransitItinerary, TransitLegData};

/// Taxi time relative to the driving route
pub const TAXI_DURATION_FACTOR: f64 = 1.10;

/// Maximum number of transit itineraries turned into routes
pub const MAX_TRANSIT_ROUTES: usize = 2;

/// Id of the placeholder emitted when transit has nothing to offer
pub const TRANSIT_PLACEHOLDER_ID: &str = "transit";

/// Summary of the transit placeholder
pub const NO_TRANSIT_SUMMARY: &str = "No transit data for this route";

/// The four providers queried per planning request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Street routing, walking profile
    Walking,
    /// Street routing, driving profile
    Driving,
    /// Street routing, cycling profile
    Cycling,
    /// Transit planner
    Transit,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Walking => "walking",
            Self::Driving => "driving",
            Self::Cycling => "cycling",
            Self::Transit => "transit",
        };
        f.write_str(name)
    }
}

/// Why a provider produced no value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} provider failed: {reason}")]
pub struct ProviderFailure {
    /// Provider that failed
    pub provider: Provider,
    /// Human-readable reason
    pub reason: String,
}

impl ProviderFailure {
    /// Create a failure record
    pub fn new(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            reason: reason.into(),
        }
    }
}

/// Fulfilled value or rejection of one provider call
pub type ProviderOutcome<T> = Result<T, ProviderFailure>;

/// Settled outcomes of all four providers for one request
#[derive(Debug, Clone)]
pub struct ProviderOutcomes {
    /// Walking route
    pub walk: ProviderOutcome<StreetRoute>,
    /// Driving route, also the basis of the taxi estimate
    pub drive: ProviderOutcome<StreetRoute>,
    /// Cycling route
    pub cycle: ProviderOutcome<StreetRoute>,
    /// Transit itineraries in provider order
    pub transit: ProviderOutcome<Vec<TransitItinerary>>,
}

impl ProviderOutcomes {
    /// Failures among the four outcomes, in walk/drive/cycle/transit order
    pub fn failures(&self) -> Vec<&ProviderFailure> {
        [
            self.walk.as_ref().err(),
            self.drive.as_ref().err(),
            self.cycle.as_ref().err(),
            self.transit.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Build the ranked route list for one request
///
/// Routes are emitted as walk, cycle, drive, taxi, transit, then sorted:
/// available routes by ascending duration, unavailable routes last in
/// emission order. The first available route is tagged fastest.
pub fn aggregate(outcomes: &ProviderOutcomes, origin: &Location, destination: &Location) -> Vec<Route> {
    let mut routes = Vec::with_capacity(4 + MAX_TRANSIT_ROUTES);

    if let Ok(walk) = &outcomes.walk {
        routes.push(street_route(TravelMode::Walk, walk));
    }
    if let Ok(cycle) = &outcomes.cycle {
        routes.push(street_route(TravelMode::Cycle, cycle));
    }
    if let Ok(drive) = &outcomes.drive {
        routes.push(street_route(TravelMode::Drive, drive));
        routes.push(taxi_route(drive));
    }

    match &outcomes.transit {
        Ok(itineraries) if !itineraries.is_empty() => routes.extend(
            itineraries
                .iter()
                .take(MAX_TRANSIT_ROUTES)
                .enumerate()
                .map(|(index, itinerary)| transit_route(index, itinerary, origin, destination)),
        ),
        _ => routes.push(Route::unavailable(
            TRANSIT_PLACEHOLDER_ID,
            TravelMode::Transit,
            NO_TRANSIT_SUMMARY,
        )),
    }

    rank(&mut routes);
    routes
}

fn street_route(mode: TravelMode, route: &StreetRoute) -> Route {
    let style = mode.style();
    let label = mode.short_label();
    Route {
        id: mode.as_str().to_string(),
        mode,
        label: mode.route_label().to_string(),
        icon: style.icon,
        color: style.color,
        duration_secs: route.duration_secs,
        distance_m: route.distance_m,
        geometry: route.geometry.clone(),
        legs: vec![Leg::new(mode.leg_mode(), label, route.duration_secs, route.distance_m)],
        steps: maneuver_steps(&route.maneuvers, style),
        summary: format!("{label} {}", format_duration(route.duration_secs)),
        unavailable: false,
        fastest: false,
        transfers: None,
        cost_estimate: None,
    }
}

fn taxi_route(drive: &StreetRoute) -> Route {
    let duration = drive.duration_secs * TAXI_DURATION_FACTOR;
    let fare = taxi_fare_estimate(drive.distance_m);
    let mut route = street_route(TravelMode::Taxi, drive);
    route.duration_secs = duration;
    route.legs = vec![Leg::new(
        LegMode::Taxi,
        format!("Taxi ≈{fare}"),
        duration,
        drive.distance_m,
    )];
    route.summary = format!("Taxi {} · est. {fare}", format_duration(duration));
    route.cost_estimate = Some(fare);
    route
}

fn transit_route(
    index: usize,
    itinerary: &TransitItinerary,
    origin: &Location,
    destination: &Location,
) -> Route {
    let style = TravelMode::Transit.style();
    let last = itinerary.legs.len().saturating_sub(1);

    let legs: Vec<Leg> = itinerary
        .legs
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let from = data
                .from
                .clone()
                .or_else(|| (i == 0).then(|| origin.name().to_string()));
            let to = data
                .to
                .clone()
                .or_else(|| (i == last).then(|| destination.name().to_string()));
            transit_leg(data).between(from, to)
        })
        .collect();

    let steps = legs
        .iter()
        .map(|leg| Step {
            icon: leg.icon,
            color: leg.color,
            action: leg.label.clone(),
            meta: meta(leg.duration_secs, leg.distance_m),
            from: leg.from.clone(),
            to: leg.to.clone(),
        })
        .collect();

    let summary = legs
        .iter()
        .map(|leg| format!("{} {}", leg.icon, leg.label))
        .collect::<Vec<_>>()
        .join(" → ");

    Route {
        id: format!("transit_{index}"),
        mode: TravelMode::Transit,
        label: if index == 0 { "Transit" } else { "Transit (alt)" }.to_string(),
        icon: style.icon,
        color: style.color,
        duration_secs: itinerary.duration_secs,
        distance_m: itinerary.walk_distance_m,
        geometry: None,
        legs,
        steps,
        summary,
        unavailable: false,
        fastest: false,
        transfers: Some(itinerary.transfers),
        cost_estimate: None,
    }
}

fn transit_leg(data: &TransitLegData) -> Leg {
    let raw_mode = data.mode.as_deref().filter(|m| !m.is_empty());
    let mode = raw_mode.map_or(LegMode::Walk, LegMode::from_provider);
    let walking = mode.is_walking();

    let label = match data.route_short_name.as_deref().filter(|s| !s.is_empty()) {
        Some(short_name) => {
            let base = if walking { "Walk" } else { short_name };
            match data.headsign.as_deref().filter(|s| !s.is_empty()) {
                Some(headsign) => format!("{base} → {headsign}"),
                None => base.to_string(),
            }
        }
        None if walking => "Walk".to_string(),
        None => raw_mode.unwrap_or("Transit").to_string(),
    };

    Leg::new(mode, label, data.duration_secs, data.distance_m)
}

fn maneuver_steps(maneuvers: &[Maneuver], style: ModeStyle) -> Vec<Step> {
    maneuvers
        .iter()
        .map(|maneuver| {
            if maneuver.is_arrival() {
                Step::arrive()
            } else {
                Step::new(
                    style,
                    describe_maneuver(maneuver),
                    meta(maneuver.duration_secs, maneuver.distance_m),
                )
            }
        })
        .collect()
}

/// Instruction text, e.g. `"Turn slight left onto Strand"`
fn describe_maneuver(maneuver: &Maneuver) -> String {
    let mut action = capitalize_kind(&maneuver.kind);
    if let Some(modifier) = maneuver.modifier.as_deref().filter(|s| !s.is_empty()) {
        action.push(' ');
        action.push_str(modifier);
    }
    if let Some(street) = maneuver.street.as_deref().filter(|s| !s.is_empty()) {
        action.push_str(" onto ");
        action.push_str(street);
    }
    action
}

fn capitalize_kind(kind: &str) -> String {
    let mut chars = kind.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.map(|c| if c == '-' { ' ' } else { c }))
            .collect()
    })
}

fn meta(duration_secs: f64, distance_m: f64) -> String {
    format!("{} · {}", format_duration(duration_secs), format_distance(distance_m))
}

fn rank(routes: &mut [Route]) {
    routes.sort_by(|a, b| match (a.unavailable, b.unavailable) {
        (false, false) => a.duration_secs.total_cmp(&b.duration_secs),
        (a_unavailable, b_unavailable) => a_unavailable.cmp(&b_unavailable),
    });

    let mut tagged = false;
    for route in routes.iter_mut() {
        route.fastest = !tagged && route.is_available();
        tagged |= route.fastest;
    }
}

/// Ranked routes of one planning request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteSet(Vec<Route>);

impl RouteSet {
    /// Aggregate and rank provider outcomes
    pub fn aggregate(outcomes: &ProviderOutcomes, origin: &Location, destination: &Location) -> Self {
        Self(aggregate(outcomes, origin, destination))
    }

    /// All routes in rank order
    pub fn routes(&self) -> &[Route] {
        &self.0
    }

    /// The route tagged fastest, if any provider succeeded
    pub fn fastest(&self) -> Option<&Route> {
        self.0.iter().find(|route| route.fastest)
    }

    /// Routes that can be taken
    pub fn available(&self) -> impl Iterator<Item = &Route> {
        self.0.iter().filter(|route| route.is_available())
    }

    /// Number of routes that can be taken
    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    /// Route by id, e.g. `"taxi"` or `"transit_1"`
    pub fn get(&self, id: &str) -> Option<&Route> {
        self.0.iter().find(|route| route.id == id)
    }

    /// Whether every provider failed, leaving only the transit placeholder
    pub fn is_total_failure(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.unavailable && only.id == TRANSIT_PLACEHOLDER_ID)
    }

    /// Number of routes including unavailable ones
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no routes at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate routes in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
