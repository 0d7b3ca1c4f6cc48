//! Geocoding adapter - Implements GeocodingPort using Nominatim

use application::error::ApplicationError;
use application::ports::{GeocodeCandidate, GeocodingPort};
use async_trait::async_trait;
use integration_transit::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::instrument;

/// Adapter for place search and reverse geocoding
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter over a Nominatim client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing geocoding client
    pub fn with_client(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::NotFound(what) => ApplicationError::NotFound(what),
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
            e => ApplicationError::ExternalService(e.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(
        &self,
        text: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let results = self
            .client
            .search(text, limit)
            .await
            .map_err(Self::map_error)?;

        Ok(results
            .into_iter()
            .map(|result| GeocodeCandidate {
                lat: result.lat,
                lon: result.lon,
                display_name: result.display_name,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, ApplicationError> {
        self.client.reverse(lat, lon).await.map_err(Self::map_error)
    }
}
