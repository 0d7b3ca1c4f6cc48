//! Nominatim geocoding client
//!
//! Free-text place search and reverse geocoding using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Requests are spaced at least 1.1 s apart as the Nominatim usage policy
//! asks, and search results are cached for a configurable TTL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

const MIN_REQUEST_SPACING: Duration = Duration::from_millis(1100);

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Comma separated country codes to restrict search to (empty for none)
    #[serde(default)]
    pub country_filter: String,

    /// User-Agent header, required by the usage policy
    #[serde(default = "default_geocoding_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_geocoding_user_agent() -> String {
    "HOMERUN-transit-navigator/1.0".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
            user_agent: default_geocoding_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Nothing matched the query or coordinates
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RateLimitExceeded | Self::Timeout
        )
    }
}

/// A place matching a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Full display name as returned by Nominatim
    pub display_name: String,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places by free text, best match first
    async fn search(&self, text: &str, limit: u8) -> Result<Vec<GeocodeResult>, GeocodingError>;

    /// Display name of the place at the given coordinates
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<GeocodeResult>>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_SPACING {
                let wait = MIN_REQUEST_SPACING.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, GeocodingError> {
        self.rate_limit().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        Self::read_body(response).await
    }

    async fn read_body(response: Response) -> Result<String, GeocodingError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }

        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))
    }

    /// Parse a search response, skipping entries with unreadable coordinates
    fn parse_search_response(body: &str) -> Result<Vec<GeocodeResult>, GeocodingError> {
        let raw: Vec<RawPlace> =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(raw
            .into_iter()
            .filter_map(|place| {
                let lat = place.lat.parse::<f64>().ok()?;
                let lon = place.lon.parse::<f64>().ok()?;
                Some(GeocodeResult {
                    lat,
                    lon,
                    display_name: place.display_name.unwrap_or_default(),
                })
            })
            .collect())
    }

    fn parse_reverse_response(body: &str) -> Result<Option<String>, GeocodingError> {
        let raw: RawReverse =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;
        Ok(raw.display_name.filter(|name| !name.trim().is_empty()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, text: &str, limit: u8) -> Result<Vec<GeocodeResult>, GeocodingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GeocodingError::NotFound(
                "Search text must not be empty".to_string(),
            ));
        }

        let cache_key = format!("{limit}:{}", text.to_lowercase());
        if let Some(cache) = &self.cache {
            if let Some(results) = cache.get(&cache_key).await {
                debug!(%text, "Geocoding cache hit");
                return Ok(results);
            }
        }

        let mut params = vec![
            ("q", text.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.max(1).to_string()),
            ("addressdetails", "1".to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%text, "Searching places");

        let body = self.get(&self.endpoint("search"), &params).await?;
        let results = Self::parse_search_response(&body)?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, results.clone()).await;
        }
        debug!(%text, count = results.len(), "Places found");

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String, GeocodingError> {
        let params = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!(%lat, %lon, "Reverse geocoding");

        let body = self.get(&self.endpoint("reverse"), &params).await?;
        Self::parse_reverse_response(&body)?
            .ok_or_else(|| GeocodingError::NotFound(format!("{lat},{lon}")))
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Reverse lookups answer `{"error": ...}` when nothing is there
#[derive(Debug, Deserialize)]
struct RawReverse {
    display_name: Option<String>,
}
