//! Overpass service configuration

use serde::{Deserialize, Serialize};

/// Search radius per kind of point of interest, in metres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRadii {
    /// `highway=bus_stop` nodes
    pub bus_stop: u32,
    /// `public_transport=stop_position` nodes served by buses
    pub stop_position: u32,
    /// `railway=station` nodes
    pub station: u32,
    /// `railway=halt` nodes
    pub halt: u32,
    /// `amenity=bicycle_rental` nodes
    pub bicycle_rental: u32,
    /// `amenity=taxi` nodes
    pub taxi: u32,
}

impl Default for SearchRadii {
    fn default() -> Self {
        Self {
            bus_stop: 600,
            stop_position: 600,
            station: 3000,
            halt: 2000,
            bicycle_rental: 800,
            taxi: 1000,
        }
    }
}

impl SearchRadii {
    fn all(&self) -> [(&'static str, u32); 6] {
        [
            ("bus_stop", self.bus_stop),
            ("stop_position", self.stop_position),
            ("station", self.station),
            ("halt", self.halt),
            ("bicycle_rental", self.bicycle_rental),
            ("taxi", self.taxi),
        ]
    }
}

/// Configuration for the Overpass API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side query timeout in seconds, sent in the query header
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u32,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Search radii per point of interest kind
    #[serde(default)]
    pub radii: SearchRadii,
}

fn default_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_query_timeout_secs() -> u32 {
    15
}

fn default_user_agent() -> String {
    "HOMERUN-transit-navigator/1.0".to_string()
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
            user_agent: default_user_agent(),
            radii: SearchRadii::default(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("url must not be empty".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("url must be an http(s) URL".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.query_timeout_secs == 0 {
            return Err("query_timeout_secs must be greater than 0".to_string());
        }

        if let Some((kind, _)) = self.radii.all().into_iter().find(|(_, r)| *r == 0) {
            return Err(format!("radii.{kind} must be greater than 0"));
        }

        Ok(())
    }
}
