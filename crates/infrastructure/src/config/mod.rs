//! Application configuration
//!
//! Layered through the `config` crate: built-in defaults, then an optional
//! `homerun.toml` (or an explicit file), then `HOMERUN__SECTION__KEY`
//! environment variables.
//!
//! Sections:
//! - `routing`: OSRM street routing
//! - `transit`: Transitous itineraries
//! - `geocoding`: Nominatim search and reverse lookup
//! - `overpass`: nearby transport query
//! - `logging`: filter and output format
//! - `home`: home preference store

mod integrations;
mod logging;

use std::path::{Path, PathBuf};

use integration_overpass::OverpassConfig;
use integration_routing::RoutingConfig;
use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::persistence::default_home_path;

pub use integrations::GeocodingAppConfig;
pub use logging::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HOMERUN";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "homerun";

/// Home preference section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeConfig {
    /// Store file, defaults to `~/.config/homerun/home.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl HomeConfig {
    /// Resolved store path
    pub fn store_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_home_path)
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Street routing
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Transit itineraries
    #[serde(default)]
    pub transit: TransitConfig,

    /// Place search
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Nearby transport
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Home preference
    #[serde(default)]
    pub home: HomeConfig,
}

impl AppConfig {
    /// Load configuration from `homerun.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `homerun.toml` when given
    ///
    /// An explicit file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn build(path: Option<&Path>, env: config::Environment) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                config::File::from(path).required(true)
            },
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        self.routing
            .validate()
            .map_err(|e| format!("routing: {e}"))?;
        self.transit
            .validate()
            .map_err(|e| format!("transit: {e}"))?;
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.overpass
            .validate()
            .map_err(|e| format!("overpass: {e}"))?;
        if self.logging.filter.trim().is_empty() {
            return Err("logging: filter must not be empty".to_string());
        }
        Ok(())
    }
}
