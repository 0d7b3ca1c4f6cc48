//! Transitous transit client
//!
//! Plans public transit itineraries through the
//! [Transitous](https://transitous.org) `plan` endpoint. Responses are read
//! leniently: itineraries may sit at the top level or under `plan`, and leg
//! times may be epoch milliseconds or RFC 3339 strings.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{Itinerary, ItineraryLeg};

/// Characters of an error body kept in [`TransitError::Rejected`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Plan itineraries between two `(lat, lon)` points
    ///
    /// `departure` defaults to now. An empty list means no itinerary.
    async fn plan(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<Itinerary>, TransitError>;
}

/// Transitous-backed transit client
#[derive(Debug)]
pub struct TransitousClient {
    client: Client,
    config: TransitConfig,
}

impl TransitousClient {
    /// Create a new Transitous client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Query parameters of a plan request
    fn plan_params<Tz: TimeZone>(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        departure: &DateTime<Tz>,
    ) -> Vec<(&'static str, String)>
    where
        Tz::Offset: std::fmt::Display,
    {
        vec![
            ("fromLat", from.0.to_string()),
            ("fromLon", from.1.to_string()),
            ("toLat", to.0.to_string()),
            ("toLon", to.1.to_string()),
            ("time", departure.format("%H:%M").to_string()),
            ("date", departure.format("%Y-%m-%d").to_string()),
            ("numItineraries", self.config.max_itineraries.to_string()),
        ]
    }

    /// Parse a raw plan response into typed itineraries
    fn parse_plan_response(body: &str) -> Result<Vec<Itinerary>, TransitError> {
        let raw: RawPlanResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        let itineraries = raw
            .itineraries
            .or_else(|| raw.plan.and_then(|plan| plan.itineraries))
            .unwrap_or_default();

        Ok(itineraries
            .into_iter()
            .map(Self::convert_itinerary)
            .collect())
    }

    /// Convert a raw itinerary, deriving missing totals from its legs
    fn convert_itinerary(raw: RawItinerary) -> Itinerary {
        let legs: Vec<ItineraryLeg> = raw.legs.into_iter().map(Self::convert_leg).collect();

        let span = legs
            .first()
            .and_then(|first| first.start_time)
            .zip(legs.last().and_then(|last| last.end_time))
            .map(|(start, end)| seconds_between(start, end));
        let duration_secs = raw
            .duration
            .or(span)
            .unwrap_or_else(|| legs.iter().map(|leg| leg.duration_secs).sum());

        let walk_distance_m = raw.walk_distance.unwrap_or_else(|| {
            legs.iter()
                .filter(|leg| leg.is_walking())
                .map(|leg| leg.distance_m)
                .sum()
        });

        let transfers = raw.transfers.unwrap_or_else(|| {
            let rides = legs.iter().filter(|leg| !leg.is_walking()).count();
            u32::try_from(rides.saturating_sub(1)).unwrap_or(u32::MAX)
        });

        Itinerary {
            duration_secs,
            walk_distance_m,
            transfers,
            legs,
        }
    }

    /// Convert a raw leg to a typed leg
    fn convert_leg(raw: RawLeg) -> ItineraryLeg {
        let start_time = raw.start_time.and_then(RawTime::into_utc);
        let end_time = raw.end_time.and_then(RawTime::into_utc);
        let duration_secs = raw
            .duration
            .or_else(|| start_time.zip(end_time).map(|(s, e)| seconds_between(s, e)))
            .unwrap_or(0.0);

        let route_short_name = raw
            .route_short_name
            .or_else(|| raw.route.and_then(RawRoute::short_name))
            .filter(|name| !name.is_empty());

        ItineraryLeg {
            mode: raw.mode.filter(|mode| !mode.is_empty()),
            route_short_name,
            headsign: raw.headsign.filter(|h| !h.is_empty()),
            start_time,
            end_time,
            duration_secs,
            distance_m: raw.distance.unwrap_or(0.0),
            from: raw.from.and_then(|place| place.name),
            to: raw.to.and_then(|place| place.name),
        }
    }
}

#[async_trait]
impl TransitClient for TransitousClient {
    #[instrument(skip(self))]
    async fn plan(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        departure: Option<DateTime<Utc>>,
    ) -> Result<Vec<Itinerary>, TransitError> {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return Err(TransitError::InvalidLocation(
                "coordinates must be finite".to_string(),
            ));
        }

        let url = format!("{}/plan", self.config.base_url.trim_end_matches('/'));
        let departure = departure.unwrap_or_else(Utc::now).with_timezone(&Local);
        let params = self.plan_params(from, to, &departure);

        debug!(?url, "Planning transit itineraries");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status.is_server_error() {
            return Err(TransitError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Rejected {
                status: status.as_u16(),
                message: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let itineraries = Self::parse_plan_response(&body)?;

        if itineraries.is_empty() {
            warn!("No itineraries found");
        }

        debug!(count = itineraries.len(), "Itineraries found");
        Ok(itineraries)
    }
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawPlanResponse {
    itineraries: Option<Vec<RawItinerary>>,
    plan: Option<RawPlan>,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    itineraries: Option<Vec<RawItinerary>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItinerary {
    duration: Option<f64>,
    walk_distance: Option<f64>,
    transfers: Option<u32>,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    mode: Option<String>,
    route_short_name: Option<String>,
    route: Option<RawRoute>,
    headsign: Option<String>,
    start_time: Option<RawTime>,
    end_time: Option<RawTime>,
    duration: Option<f64>,
    distance: Option<f64>,
    from: Option<RawPlace>,
    to: Option<RawPlace>,
}

/// `route` is a plain name in some responses and an object in others
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRoute {
    Name(String),
    Info {
        #[serde(rename = "shortName")]
        short_name: Option<String>,
    },
}

impl RawRoute {
    fn short_name(self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name),
            Self::Info { short_name } => short_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Millis(i64),
    Text(String),
}

impl RawTime {
    fn into_utc(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(ms),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
}
