//! Transit adapter - Implements TransitPort using integration_transit

use application::error::ApplicationError;
use application::ports::{TransitItinerary, TransitLegData, TransitPort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{DomainError, Location};
use integration_transit::{
    Itinerary, ItineraryLeg, TransitClient, TransitConfig, TransitError, TransitousClient,
};
use tracing::{debug, instrument};

/// Adapter for public transit itineraries using Transitous
pub struct TransitAdapter {
    client: Box<dyn TransitClient>,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("client", &"TransitClient")
            .finish()
    }
}

impl TransitAdapter {
    /// Create an adapter over a Transitous client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = TransitousClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing transit client
    pub fn with_client(client: impl TransitClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration transit error to application error
    fn map_error(err: TransitError) -> ApplicationError {
        match err {
            TransitError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            TransitError::InvalidLocation(reason) => {
                ApplicationError::Domain(DomainError::ValidationError(reason))
            },
            e => ApplicationError::ExternalService(format!("Transit planning failed: {e}")),
        }
    }

    fn convert_leg(leg: ItineraryLeg) -> TransitLegData {
        TransitLegData {
            mode: leg.mode,
            route_short_name: leg.route_short_name,
            headsign: leg.headsign,
            duration_secs: leg.duration_secs,
            distance_m: leg.distance_m,
            from: leg.from,
            to: leg.to,
        }
    }

    fn convert_itinerary(itinerary: Itinerary) -> TransitItinerary {
        TransitItinerary {
            duration_secs: itinerary.duration_secs,
            walk_distance_m: itinerary.walk_distance_m,
            transfers: itinerary.transfers,
            legs: itinerary.legs.into_iter().map(Self::convert_leg).collect(),
        }
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn plan(
        &self,
        from: &Location,
        to: &Location,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<TransitItinerary>, ApplicationError> {
        let itineraries = self
            .client
            .plan((from.lat(), from.lon()), (to.lat(), to.lon()), departure)
            .await
            .map_err(Self::map_error)?;

        debug!(count = itineraries.len(), "Converted transit itineraries");
        Ok(itineraries
            .into_iter()
            .map(Self::convert_itinerary)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            TransitAdapter::map_error(TransitError::RateLimitExceeded {
                retry_after_secs: None
            }),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::InvalidLocation("NaN".into())),
            ApplicationError::Domain(_)
        ));
        assert!(matches!(
            TransitAdapter::map_error(TransitError::ServiceUnavailable { status: 503 }),
            ApplicationError::ExternalService(msg) if msg.contains("503")
        ));
    }

    #[test]
    fn test_itinerary_conversion_keeps_leg_order() {
        let itinerary = Itinerary {
            duration_secs: 1500.0,
            walk_distance_m: 300.0,
            transfers: 1,
            legs: vec![
                ItineraryLeg {
                    mode: Some("WALK".into()),
                    distance_m: 300.0,
                    ..ItineraryLeg::default()
                },
                ItineraryLeg {
                    mode: Some("BUS".into()),
                    route_short_name: Some("24".into()),
                    headsign: Some("Hampstead Heath".into()),
                    ..ItineraryLeg::default()
                },
            ],
        };
        let converted = TransitAdapter::convert_itinerary(itinerary);
        assert_eq!(converted.transfers, 1);
        assert_eq!(converted.legs.len(), 2);
        assert_eq!(converted.legs[1].route_short_name.as_deref(), Some("24"));
        assert_eq!(converted.legs[1].headsign.as_deref(), Some("Hampstead Heath"));
    }
}
