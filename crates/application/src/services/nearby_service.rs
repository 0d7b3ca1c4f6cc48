//! Nearby stops around a trip origin

use std::fmt;
use std::sync::Arc;

use domain::{Location, StopIndex};
use serde::Serialize;
use tracing::{debug, instrument};

use super::poi_classifier::classify;
use super::request_epoch::{RequestEpoch, RequestTicket};
use crate::error::ApplicationError;
use crate::ports::PoiQueryPort;

/// Stops found for one origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStops {
    /// Ticket the query was issued under
    pub ticket: RequestTicket,
    /// Classified stops
    pub stops: StopIndex,
}

/// Finds and classifies transport stops near a location
pub struct NearbyService {
    poi: Arc<dyn PoiQueryPort>,
    epoch: RequestEpoch,
}

impl fmt::Debug for NearbyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearbyService")
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl NearbyService {
    /// Create a new nearby service with its own epoch
    pub fn new(poi: Arc<dyn PoiQueryPort>) -> Self {
        Self {
            poi,
            epoch: RequestEpoch::new(),
        }
    }

    /// Epoch tickets are issued from
    pub const fn epoch(&self) -> &RequestEpoch {
        &self.epoch
    }

    /// Stops around `origin`, nearest first per kind
    #[instrument(skip(self, origin), fields(origin = %origin))]
    pub async fn nearby(&self, origin: &Location) -> Result<NearbyStops, ApplicationError> {
        let ticket = self.epoch.issue();
        let elements = self.poi.nearby(origin).await?;
        let stops = classify(&elements, origin);

        debug!(%ticket, elements = elements.len(), stops = stops.len(), "Nearby stops classified");
        Ok(NearbyStops { ticket, stops })
    }
}
