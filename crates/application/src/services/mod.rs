//! Application services - Use case implementations

mod journey_planner;
mod location_service;
mod nearby_service;
mod poi_classifier;
mod request_epoch;
mod route_aggregator;

pub use journey_planner::{JourneyPlanner, PlannedJourney};
pub use location_service::{
    DEFAULT_SEARCH_LIMIT, LocationService, fallback_label, short_place_name,
};
pub use nearby_service::{NearbyService, NearbyStops};
pub use poi_classifier::{classify, element_kind};
pub use request_epoch::{RequestEpoch, RequestTicket, ResultBoard, RouteBoard, StopBoard};
pub use route_aggregator::{
    MAX_TRANSIT_ROUTES, NO_TRANSIT_SUMMARY, Provider, ProviderFailure, ProviderOutcome,
    ProviderOutcomes, RouteSet, TAXI_DURATION_FACTOR, TRANSIT_PLACEHOLDER_ID, aggregate,
};
