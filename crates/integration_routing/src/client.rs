//! OSRM routing client
//!
//! Queries the `route` service of an OSRM server with full GeoJSON geometry
//! and per-step maneuvers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{RouteProfile, RouteStep, StreetPath};

/// Trait for street routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fastest route between two `(lat, lon)` points
    async fn route(
        &self,
        profile: RouteProfile,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<StreetPath, RoutingError>;
}

/// OSRM-backed routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(RoutingError::ConfigurationError(format!(
                "base_url must be an http(s) URL, got {:?}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Request URL for a profile and a pair of `(lat, lon)` points
    fn route_url(&self, profile: RouteProfile, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }

    /// Parse a raw OSRM route response into the first route
    fn parse_route_response(body: &str) -> Result<StreetPath, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if raw.code != "Ok" {
            return Err(RoutingError::NoRoute(
                raw.message.unwrap_or(raw.code),
            ));
        }

        let route = raw
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::NoRoute("response contained no routes".to_string()))?;

        Ok(Self::convert_route(route))
    }

    /// Convert a raw route to a typed path, flattening the steps of all legs
    fn convert_route(raw: RawRoute) -> StreetPath {
        let steps = raw
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| RouteStep {
                maneuver_type: step.maneuver.maneuver_type,
                modifier: step.maneuver.modifier,
                name: step.name.filter(|n| !n.is_empty()),
                duration_secs: step.duration,
                distance_m: step.distance,
            })
            .collect();

        StreetPath {
            duration_secs: raw.duration,
            distance_m: raw.distance,
            coordinates: raw.geometry.map(|g| g.coordinates).unwrap_or_default(),
            steps,
        }
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self))]
    async fn route(
        &self,
        profile: RouteProfile,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<StreetPath, RoutingError> {
        let url = self.route_url(profile, from, to);
        let params = [
            ("overview", "full"),
            ("geometries", "geojson"),
            ("steps", "true"),
        ];

        debug!(?url, "Requesting route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let path = Self::parse_route_response(&body)?;
        debug!(
            duration_secs = path.duration_secs,
            distance_m = path.distance_m,
            steps = path.steps.len(),
            "Route found"
        );
        Ok(path)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    duration: f64,
    distance: f64,
    geometry: Option<RawGeometry>,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    duration: f64,
    distance: f64,
    name: Option<String>,
    maneuver: RawManeuver,
}

#[derive(Debug, Deserialize)]
struct RawManeuver {
    #[serde(rename = "type")]
    maneuver_type: String,
    modifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ROUTE: &str = r#"{
        "code": "Ok",
        "routes": [{
            "duration": 600.4,
            "distance": 5000.0,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-0.1281, 51.508], [-0.1262, 51.515], [-0.1238, 51.5303]]
            },
            "legs": [{
                "steps": [
                    {
                        "duration": 120.0,
                        "distance": 800.0,
                        "name": "Charing Cross Road",
                        "maneuver": { "type": "depart", "location": [-0.1281, 51.508] }
                    },
                    {
                        "duration": 480.4,
                        "distance": 4200.0,
                        "name": "",
                        "maneuver": { "type": "turn", "modifier": "left" }
                    },
                    {
                        "duration": 0.0,
                        "distance": 0.0,
                        "name": "Euston Road",
                        "maneuver": { "type": "arrive" }
                    }
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_parse_route_response() {
        let path = OsrmRoutingClient::parse_route_response(SAMPLE_ROUTE).unwrap();
        assert!((path.duration_secs - 600.4).abs() < 1e-9);
        assert!((path.distance_m - 5000.0).abs() < 1e-9);
        assert_eq!(path.coordinates.len(), 3);
        assert_eq!(path.coordinates[0], [-0.1281, 51.508]);
        assert_eq!(path.steps.len(), 3);
        assert_eq!(path.steps[0].maneuver_type, "depart");
        assert_eq!(path.steps[0].name.as_deref(), Some("Charing Cross Road"));
        assert_eq!(path.steps[1].modifier.as_deref(), Some("left"));
        assert!(path.steps[1].name.is_none());
        assert_eq!(path.steps[2].maneuver_type, "arrive");
    }

    #[test]
    fn test_parse_flattens_legs() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "duration": 10.0,
                "distance": 20.0,
                "legs": [
                    { "steps": [{ "duration": 5.0, "distance": 10.0, "maneuver": { "type": "depart" } }] },
                    { "steps": [{ "duration": 5.0, "distance": 10.0, "maneuver": { "type": "arrive" } }] }
                ]
            }]
        }"#;
        let path = OsrmRoutingClient::parse_route_response(json).unwrap();
        assert_eq!(path.steps.len(), 2);
        assert!(path.coordinates.is_empty());
    }

    #[test]
    fn test_parse_no_route_code() {
        let json = r#"{ "code": "NoRoute", "message": "Impossible route between points", "routes": [] }"#;
        let err = OsrmRoutingClient::parse_route_response(json).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoute(msg) if msg.contains("Impossible")));
    }

    #[test]
    fn test_parse_ok_without_routes() {
        let err = OsrmRoutingClient::parse_route_response(r#"{ "code": "Ok" }"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoute(_)));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = OsrmRoutingClient::parse_route_response("<html>").unwrap_err();
        assert!(matches!(err, RoutingError::ParseError(_)));
    }

    #[test]
    fn test_new_rejects_non_http_base_url() {
        let config = RoutingConfig {
            base_url: "router.project-osrm.org".to_string(),
            ..RoutingConfig::for_testing()
        };
        let err = OsrmRoutingClient::new(&config).unwrap_err();
        assert!(matches!(err, RoutingError::ConfigurationError(msg) if msg.contains("base_url")));
    }

    #[test]
    fn test_route_url_uses_lon_lat_order() {
        let config = RoutingConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..RoutingConfig::for_testing()
        };
        let client = OsrmRoutingClient::new(&config).unwrap();
        let url = client.route_url(RouteProfile::Cycling, (51.508, -0.1281), (51.5303, -0.1238));
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/cycling/-0.1281,51.508;-0.1238,51.5303"
        );
    }
}
