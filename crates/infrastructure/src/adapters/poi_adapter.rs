//! POI adapter - Implements PoiQueryPort using the Overpass API

use application::error::ApplicationError;
use application::ports::{GeoElement, PoiQueryPort};
use async_trait::async_trait;
use domain::{DomainError, Location};
use integration_overpass::{
    HttpOverpassClient, OverpassClient, OverpassConfig, OverpassElement, OverpassError,
};
use tracing::instrument;

/// Adapter for nearby transport points of interest
pub struct PoiAdapter {
    client: Box<dyn OverpassClient>,
}

impl std::fmt::Debug for PoiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoiAdapter")
            .field("client", &"OverpassClient")
            .finish()
    }
}

impl PoiAdapter {
    /// Create an adapter over an Overpass client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &OverpassConfig) -> Result<Self, ApplicationError> {
        let client = HttpOverpassClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing Overpass client
    pub fn with_client(client: impl OverpassClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn map_error(err: OverpassError) -> ApplicationError {
        match err {
            OverpassError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            OverpassError::InvalidLocation(reason) => {
                ApplicationError::Domain(DomainError::ValidationError(reason))
            },
            e => ApplicationError::ExternalService(format!("Nearby query failed: {e}")),
        }
    }

    fn convert(element: OverpassElement) -> GeoElement {
        GeoElement {
            id: element.id,
            lat: element.lat,
            lon: element.lon,
            tags: element.tags,
        }
    }
}

#[async_trait]
impl PoiQueryPort for PoiAdapter {
    #[instrument(skip(self, origin), fields(origin = %origin))]
    async fn nearby(&self, origin: &Location) -> Result<Vec<GeoElement>, ApplicationError> {
        let elements = self
            .client
            .nearby(origin.lat(), origin.lon())
            .await
            .map_err(Self::map_error)?;
        Ok(elements.into_iter().map(Self::convert).collect())
    }
}
