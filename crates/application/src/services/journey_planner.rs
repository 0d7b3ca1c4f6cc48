//! Journey planning service
//!
//! Fans one request out to the walking, driving, cycling and transit
//! providers at once, waits for all four to settle, then aggregates.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::Location;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::request_epoch::{RequestEpoch, RequestTicket};
use super::route_aggregator::{Provider, ProviderFailure, ProviderOutcome, ProviderOutcomes, RouteSet};
use crate::error::ApplicationError;
use crate::ports::{RoutingPort, RoutingProfile, TransitPort};

/// Routes produced for one planning request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedJourney {
    /// Ticket the request was issued under
    pub ticket: RequestTicket,
    /// Ranked routes
    pub routes: RouteSet,
}

/// Plans journeys across all providers
pub struct JourneyPlanner {
    routing: Arc<dyn RoutingPort>,
    transit: Arc<dyn TransitPort>,
    epoch: RequestEpoch,
}

impl fmt::Debug for JourneyPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JourneyPlanner")
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl JourneyPlanner {
    /// Create a planner with its own request epoch
    pub fn new(routing: Arc<dyn RoutingPort>, transit: Arc<dyn TransitPort>) -> Self {
        Self {
            routing,
            transit,
            epoch: RequestEpoch::new(),
        }
    }

    /// Share an epoch with a board or another component
    #[must_use]
    pub fn with_epoch(mut self, epoch: RequestEpoch) -> Self {
        self.epoch = epoch;
        self
    }

    /// Epoch tickets are issued from
    pub const fn epoch(&self) -> &RequestEpoch {
        &self.epoch
    }

    /// Plan a journey departing now
    pub async fn plan(&self, from: &Location, to: &Location) -> PlannedJourney {
        self.plan_at(from, to, None).await
    }

    /// Plan a journey with an optional transit departure time
    ///
    /// Never fails: a provider error only removes that provider's routes.
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    pub async fn plan_at(
        &self,
        from: &Location,
        to: &Location,
        departure: Option<DateTime<Utc>>,
    ) -> PlannedJourney {
        let ticket = self.epoch.issue();
        let outcomes = self.fetch_outcomes(from, to, departure).await;
        let routes = RouteSet::aggregate(&outcomes, from, to);

        info!(
            %ticket,
            available = routes.available_count(),
            fastest = routes.fastest().map(|r| r.id.as_str()),
            "Journey planned"
        );
        PlannedJourney { ticket, routes }
    }

    /// Query all four providers concurrently and settle every outcome
    pub async fn fetch_outcomes(
        &self,
        from: &Location,
        to: &Location,
        departure: Option<DateTime<Utc>>,
    ) -> ProviderOutcomes {
        let (walk, drive, cycle, transit) = tokio::join!(
            self.routing.route(RoutingProfile::Walking, from, to),
            self.routing.route(RoutingProfile::Driving, from, to),
            self.routing.route(RoutingProfile::Cycling, from, to),
            self.transit.plan(from, to, departure),
        );

        ProviderOutcomes {
            walk: settle(Provider::Walking, walk),
            drive: settle(Provider::Driving, drive),
            cycle: settle(Provider::Cycling, cycle),
            transit: settle(Provider::Transit, transit),
        }
    }
}

fn settle<T>(provider: Provider, result: Result<T, ApplicationError>) -> ProviderOutcome<T> {
    result.map_err(|e| {
        warn!(%provider, error = %e, "Provider rejected");
        ProviderFailure::new(provider, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::ports::{MockRoutingPort, MockTransitPort, StreetRoute, TransitItinerary};
    use crate::services::request_epoch::RouteBoard;

    fn from() -> Location {
        Location::new(51.5080, -0.1281, "Trafalgar Square").expect("valid")
    }

    fn to() -> Location {
        Location::new(51.5303, -0.1238, "King's Cross").expect("valid")
    }

    fn street(duration_secs: f64, distance_m: f64) -> StreetRoute {
        StreetRoute {
            duration_secs,
            distance_m,
            geometry: None,
            maneuvers: vec![],
        }
    }

    fn itinerary(duration_secs: f64) -> TransitItinerary {
        TransitItinerary {
            duration_secs,
            walk_distance_m: 300.0,
            transfers: 1,
            legs: vec![],
        }
    }

    fn routing_mock() -> MockRoutingPort {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .times(3)
            .returning(|profile, _, _| {
                Ok(match profile {
                    RoutingProfile::Walking => street(2400.0, 2900.0),
                    RoutingProfile::Driving => street(600.0, 5000.0),
                    RoutingProfile::Cycling => street(900.0, 3100.0),
                })
            });
        routing
    }

    #[tokio::test]
    async fn test_plan_queries_every_provider() {
        let mut transit = MockTransitPort::new();
        transit
            .expect_plan()
            .times(1)
            .returning(|_, _, _| Ok(vec![itinerary(1500.0)]));

        let planner = JourneyPlanner::new(Arc::new(routing_mock()), Arc::new(transit));
        let journey = planner.plan(&from(), &to()).await;

        assert_eq!(journey.routes.len(), 5);
        assert_eq!(journey.routes.fastest().map(|r| r.id.as_str()), Some("drive"));
        assert!(planner.epoch().is_current(journey.ticket));
    }

    #[tokio::test]
    async fn test_provider_errors_are_not_fatal() {
        let mut routing = MockRoutingPort::new();
        routing.expect_route().returning(|profile, _, _| match profile {
            RoutingProfile::Cycling => Ok(street(900.0, 3100.0)),
            _ => Err(ApplicationError::ExternalService("HTTP 503".into())),
        });
        let mut transit = MockTransitPort::new();
        transit
            .expect_plan()
            .returning(|_, _, _| Err(ApplicationError::RateLimited));

        let planner = JourneyPlanner::new(Arc::new(routing), Arc::new(transit));
        let outcomes = planner.fetch_outcomes(&from(), &to(), None).await;
        assert_eq!(outcomes.failures().len(), 3);
        assert_eq!(
            outcomes.transit.as_ref().err().map(|f| f.reason.as_str()),
            Some("Rate limit exceeded")
        );

        let journey = planner.plan(&from(), &to()).await;
        let ids: Vec<&str> = journey.routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["cycle", "transit"]);
    }

    #[tokio::test]
    async fn test_total_failure_yields_placeholder() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .returning(|_, _, _| Err(ApplicationError::NotFound("no route".into())));
        let mut transit = MockTransitPort::new();
        transit.expect_plan().returning(|_, _, _| Ok(vec![]));

        let planner = JourneyPlanner::new(Arc::new(routing), Arc::new(transit));
        let journey = planner.plan(&from(), &to()).await;
        assert!(journey.routes.is_total_failure());
    }

    #[tokio::test]
    async fn test_departure_is_forwarded_to_transit() {
        let departure = DateTime::parse_from_rfc3339("2026-10-15T08:30:00Z")
            .expect("valid")
            .with_timezone(&Utc);
        let mut transit = MockTransitPort::new();
        transit
            .expect_plan()
            .withf(move |_, _, when| *when == Some(departure))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let planner = JourneyPlanner::new(Arc::new(routing_mock()), Arc::new(transit));
        planner.plan_at(&from(), &to(), Some(departure)).await;
    }

    /// Routing fake whose answers arrive in a configurable order
    struct DelayedRouting {
        delays_ms: [u64; 3],
        barrier: Option<Arc<Barrier>>,
    }

    #[async_trait]
    impl RoutingPort for DelayedRouting {
        async fn route(
            &self,
            profile: RoutingProfile,
            _from: &Location,
            _to: &Location,
        ) -> Result<StreetRoute, ApplicationError> {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            let (delay, route) = match profile {
                RoutingProfile::Walking => (self.delays_ms[0], street(2400.0, 2900.0)),
                RoutingProfile::Driving => (self.delays_ms[1], street(600.0, 5000.0)),
                RoutingProfile::Cycling => (self.delays_ms[2], street(900.0, 3100.0)),
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(route)
        }
    }

    struct DelayedTransit {
        delay_ms: u64,
        barrier: Option<Arc<Barrier>>,
    }

    #[async_trait]
    impl TransitPort for DelayedTransit {
        async fn plan(
            &self,
            _from: &Location,
            _to: &Location,
            _departure: Option<DateTime<Utc>>,
        ) -> Result<Vec<TransitItinerary>, ApplicationError> {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(vec![itinerary(1500.0), itinerary(1700.0)])
        }
    }

    #[tokio::test]
    async fn test_result_independent_of_settle_order() {
        let plan_with = |delays_ms: [u64; 3], transit_ms: u64| {
            JourneyPlanner::new(
                Arc::new(DelayedRouting {
                    delays_ms,
                    barrier: None,
                }),
                Arc::new(DelayedTransit {
                    delay_ms: transit_ms,
                    barrier: None,
                }),
            )
        };

        let first = plan_with([1, 20, 40], 60).plan(&from(), &to()).await;
        let second = plan_with([60, 40, 20], 1).plan(&from(), &to()).await;
        assert_eq!(first.routes, second.routes);
    }

    #[tokio::test]
    async fn test_provider_calls_run_concurrently() {
        // each call waits until all four are in flight
        let barrier = Arc::new(Barrier::new(4));
        let planner = JourneyPlanner::new(
            Arc::new(DelayedRouting {
                delays_ms: [0, 0, 0],
                barrier: Some(Arc::clone(&barrier)),
            }),
            Arc::new(DelayedTransit {
                delay_ms: 0,
                barrier: Some(barrier),
            }),
        );

        let journey = tokio::time::timeout(Duration::from_secs(5), planner.plan(&from(), &to()))
            .await
            .expect("provider calls were serialised");
        assert_eq!(journey.routes.available_count(), 6);
    }

    #[tokio::test]
    async fn test_superseded_journey_is_not_displayed() {
        let epoch = RequestEpoch::new();
        let board = RouteBoard::new(epoch.clone());

        let mut transit = MockTransitPort::new();
        transit.expect_plan().returning(|_, _, _| Ok(vec![]));
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .returning(|_, _, _| Ok(street(600.0, 800.0)));
        let planner =
            JourneyPlanner::new(Arc::new(routing), Arc::new(transit)).with_epoch(epoch.clone());

        let stale = planner.plan(&from(), &to()).await;
        let fresh = planner.plan(&to(), &from()).await;

        assert!(board.apply(fresh.ticket, fresh.routes.clone()));
        assert!(!board.apply(stale.ticket, stale.routes));
        assert_eq!(board.current(), Some(fresh.routes));
    }
}
