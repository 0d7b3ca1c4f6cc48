//! Overpass API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OverpassError;
use crate::models::{OverpassElement, OverpassResponse};
use crate::query::build_query;

/// Trait for point of interest query clients
#[async_trait]
pub trait OverpassClient: Send + Sync {
    /// Raw transport elements around a point
    async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<OverpassElement>, OverpassError>;
}

/// reqwest-backed Overpass interpreter client
#[derive(Debug)]
pub struct HttpOverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl HttpOverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OverpassError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn parse_response(body: &str) -> Result<Vec<OverpassElement>, OverpassError> {
        let raw: OverpassResponse =
            serde_json::from_str(body).map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let elements: Vec<OverpassElement> = raw
            .elements
            .into_iter()
            .filter_map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| debug!(error = %e, "Dropping malformed element"))
                    .ok()
            })
            .collect();

        if let Some(remark) = raw.remark.filter(|r| r.contains("error")) {
            if elements.is_empty() {
                return Err(OverpassError::RequestFailed(remark));
            }
            warn!(%remark, "Overpass returned partial results");
        }

        Ok(elements)
    }
}

#[async_trait]
impl OverpassClient for HttpOverpassClient {
    #[instrument(skip(self))]
    async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<OverpassElement>, OverpassError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(OverpassError::InvalidLocation(format!("{lat},{lon}")));
        }

        let query = build_query(lat, lon, &self.config.radii, self.config.query_timeout_secs);
        debug!(url = %self.config.url, "Querying nearby transport");

        let response = self
            .client
            .post(&self.config.url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OverpassError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OverpassError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(OverpassError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let elements = Self::parse_response(&body)?;
        debug!(count = elements.len(), "Nearby elements found");
        Ok(elements)
    }
}
