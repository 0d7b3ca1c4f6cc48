//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::{Maneuver, RoutingPort, RoutingProfile, StreetRoute};
use async_trait::async_trait;
use domain::{Location, Polyline};
use integration_routing::{
    OsrmRoutingClient, RouteProfile, RoutingClient, RoutingConfig, RoutingError, StreetPath,
};
use tracing::instrument;

/// Adapter for street routing using OSRM
pub struct RoutingAdapter {
    client: Box<dyn RoutingClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"RoutingClient")
            .finish()
    }
}

impl RoutingAdapter {
    /// Create an adapter over an OSRM client built from `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-http base URL, or an error
    /// if the HTTP client fails to initialize.
    pub fn new(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        let client = OsrmRoutingClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing routing client
    pub fn with_client(client: impl RoutingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    const fn map_profile(profile: RoutingProfile) -> RouteProfile {
        match profile {
            RoutingProfile::Walking => RouteProfile::Walking,
            RoutingProfile::Driving => RouteProfile::Driving,
            RoutingProfile::Cycling => RouteProfile::Cycling,
        }
    }

    /// Map integration routing error to application error
    fn map_error(err: RoutingError) -> ApplicationError {
        match err {
            RoutingError::NoRoute(reason) => ApplicationError::NotFound(reason),
            RoutingError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            RoutingError::ConfigurationError(e) => ApplicationError::Configuration(e),
            e @ (RoutingError::ConnectionFailed(_)
            | RoutingError::RequestFailed(_)
            | RoutingError::ParseError(_)
            | RoutingError::Timeout { .. }) => {
                ApplicationError::ExternalService(format!("Routing failed: {e}"))
            },
        }
    }

    fn map_path(path: StreetPath) -> StreetRoute {
        let geometry = (!path.coordinates.is_empty()).then(|| Polyline::new(path.coordinates));
        let maneuvers = path
            .steps
            .into_iter()
            .map(|step| Maneuver {
                kind: step.maneuver_type,
                modifier: step.modifier,
                street: step.name,
                duration_secs: step.duration_secs,
                distance_m: step.distance_m,
            })
            .collect();

        StreetRoute {
            duration_secs: path.duration_secs,
            distance_m: path.distance_m,
            geometry,
            maneuvers,
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(
        &self,
        profile: RoutingProfile,
        from: &Location,
        to: &Location,
    ) -> Result<StreetRoute, ApplicationError> {
        self.client
            .route(
                Self::map_profile(profile),
                (from.lat(), from.lon()),
                (to.lat(), to.lon()),
            )
            .await
            .map(Self::map_path)
            .map_err(Self::map_error)
    }
}
