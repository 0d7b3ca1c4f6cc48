//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer over the OSRM,
//! Transitous, Nominatim and Overpass clients, persists the home
//! preference, loads configuration and initialises logging.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeocodingAppConfig, HomeConfig, LoggingConfig};
pub use persistence::{FileHomeStore, HomeStoreError, default_home_path};
pub use telemetry::{TelemetryError, init_logging};
