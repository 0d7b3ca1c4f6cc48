//! Place search and GPS fix labelling

use std::fmt;
use std::sync::Arc;

use domain::{DomainError, Location, coordinate_label};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// Default number of search suggestions
pub const DEFAULT_SEARCH_LIMIT: u8 = 5;

/// Number of comma-separated parts kept from a reverse-geocoded name
const LABEL_PARTS: usize = 3;

/// Resolves free text and coordinates to named locations
pub struct LocationService {
    geocoding: Arc<dyn GeocodingPort>,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService").finish_non_exhaustive()
    }
}

impl LocationService {
    /// Create a new location service
    pub fn new(geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoding }
    }

    /// Search places by free text
    ///
    /// Candidates with out-of-range coordinates are skipped.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str, limit: u8) -> Result<Vec<Location>, ApplicationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError("Search text is empty".to_string()).into());
        }

        let candidates = self.geocoding.search(text, limit).await?;
        let locations: Vec<Location> = candidates
            .into_iter()
            .filter_map(|c| match Location::new(c.lat, c.lon, c.display_name) {
                Ok(location) => Some(location),
                Err(e) => {
                    warn!(lat = c.lat, lon = c.lon, error = %e, "Skipping geocoding candidate");
                    None
                },
            })
            .collect();

        debug!(count = locations.len(), "Search complete");
        Ok(locations)
    }

    /// Name a GPS fix
    ///
    /// Uses the first three parts of the reverse-geocoded name, falling back
    /// to the coordinates themselves when the lookup fails.
    #[instrument(skip(self))]
    pub async fn label_fix(&self, lat: f64, lon: f64) -> Result<Location, ApplicationError> {
        let fix = Location::from_coordinates(lat, lon)?;

        match self.geocoding.reverse(lat, lon).await {
            Ok(display_name) => {
                let label = short_place_name(&display_name);
                if label.is_empty() {
                    Ok(fix)
                } else {
                    Ok(fix.renamed(label))
                }
            },
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed, using coordinates");
                Ok(fix)
            },
        }
    }
}

/// First three comma-separated parts of a display name
pub fn short_place_name(display_name: &str) -> String {
    display_name
        .split(',')
        .take(LABEL_PARTS)
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string()
}

/// Label used for a fix that could not be named
pub fn fallback_label(lat: f64, lon: f64) -> String {
    coordinate_label(lat, lon)
}
