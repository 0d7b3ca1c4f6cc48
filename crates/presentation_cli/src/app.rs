//! Service wiring for the command line

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use application::{
    HomeStorePort, JourneyPlanner, LocationService, NearbyService, NearbyStops, PlannedJourney,
};
use chrono::{DateTime, Utc};
use domain::Location;
use infrastructure::{
    AppConfig, FileHomeStore, GeocodingAdapter, PoiAdapter, RoutingAdapter, TransitAdapter,
};
use tracing::{debug, warn};

use crate::args::PlaceArg;

/// Services built from one configuration
pub struct App {
    planner: JourneyPlanner,
    nearby: NearbyService,
    locations: LocationService,
    home: Arc<dyn HomeStorePort>,
    search_limit: u8,
}

/// Result of a planning command
#[derive(Debug)]
pub struct Trip {
    /// Resolved origin
    pub from: Location,
    /// Resolved destination
    pub to: Location,
    /// Ranked routes
    pub journey: PlannedJourney,
    /// Stops around the origin, when requested and available
    pub nearby: Option<NearbyStops>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("planner", &self.planner)
            .field("nearby", &self.nearby)
            .field("search_limit", &self.search_limit)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build every adapter and service
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let routing = Arc::new(RoutingAdapter::new(&config.routing)?);
        let transit = Arc::new(TransitAdapter::new(&config.transit)?);
        let geocoding = Arc::new(GeocodingAdapter::new(&config.geocoding.to_nominatim_config())?);
        let poi = Arc::new(PoiAdapter::new(&config.overpass)?);

        let home = FileHomeStore::new(config.home.store_path());
        debug!(path = %home.path().display(), "Using home store");

        Ok(Self {
            planner: JourneyPlanner::new(routing, transit),
            nearby: NearbyService::new(poi),
            locations: LocationService::new(geocoding),
            home: Arc::new(home),
            search_limit: config.geocoding.search_limit,
        })
    }

    /// Configured number of search candidates
    pub const fn search_limit(&self) -> u8 {
        self.search_limit
    }

    /// Turn a command-line place into a named location
    ///
    /// Coordinates are named by reverse geocoding (falling back to their own
    /// text), queries take the first search match.
    pub async fn resolve(&self, place: &PlaceArg) -> anyhow::Result<Location> {
        match place {
            PlaceArg::Coordinates { lat, lon } => self
                .locations
                .label_fix(*lat, *lon)
                .await
                .with_context(|| format!("invalid coordinates {place}")),
            PlaceArg::Query(text) => self
                .locations
                .search(text, 1)
                .await
                .with_context(|| format!("search for \"{text}\" failed"))?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no place found for \"{text}\"")),
        }
    }

    /// Place given explicitly or the stored home
    pub async fn resolve_or_home(&self, place: Option<&PlaceArg>) -> anyhow::Result<Location> {
        match place {
            Some(place) => self.resolve(place).await,
            None => self
                .home()
                .await?
                .ok_or_else(|| anyhow!("no place given and no home set, see `homerun home set`")),
        }
    }

    /// Plan from `from` to `to`, optionally listing stops around the origin
    ///
    /// A failed stop lookup is logged and does not fail the trip.
    pub async fn plan(
        &self,
        from: Location,
        to: Location,
        departure: Option<DateTime<Utc>>,
        with_nearby: bool,
    ) -> Trip {
        let planning = self.planner.plan_at(&from, &to, departure);
        let (journey, nearby) = if with_nearby {
            let (journey, nearby) = tokio::join!(planning, self.nearby.nearby(&from));
            let nearby = match nearby {
                Ok(stops) => Some(stops),
                Err(e) => {
                    warn!(error = %e, "Nearby stops unavailable");
                    None
                },
            };
            (journey, nearby)
        } else {
            (planning.await, None)
        };

        Trip {
            from,
            to,
            journey,
            nearby,
        }
    }

    /// Stops around a location
    pub async fn nearby(&self, origin: &Location) -> anyhow::Result<NearbyStops> {
        self.nearby
            .nearby(origin)
            .await
            .context("nearby stop lookup failed")
    }

    /// Place candidates for free text
    pub async fn search(&self, text: &str, limit: u8) -> anyhow::Result<Vec<Location>> {
        self.locations
            .search(text, limit)
            .await
            .with_context(|| format!("search for \"{text}\" failed"))
    }

    /// Stored home
    pub async fn home(&self) -> anyhow::Result<Option<Location>> {
        Ok(self.home.load().await?)
    }

    /// Replace the stored home
    pub async fn set_home(&self, home: &Location) -> anyhow::Result<()> {
        self.home.save(home).await.context("could not save home")
    }

    /// Forget the stored home
    pub async fn clear_home(&self) -> anyhow::Result<()> {
        self.home.clear().await.context("could not clear home")
    }
}
