//! Logging initialisation
//!
//! One `tracing-subscriber` registry with an `EnvFilter` and a plain or JSON
//! `fmt` layer writing to stderr, so command output on stdout stays clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directives did not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directives
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Pick the filter directives in priority order
///
/// An explicit override (CLI verbosity) wins over `RUST_LOG`, which wins over
/// the configured filter.
pub fn resolve_filter(
    config: &LoggingConfig,
    override_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    override_filter
        .or(rust_log.filter(|value| !value.trim().is_empty()))
        .unwrap_or(&config.filter)
        .to_string()
}

fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|e| TelemetryError::InvalidFilter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid or logging was already initialised.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(&resolve_filter(config, override_filter, rust_log.as_deref()))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| TelemetryError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_filter(&config, Some("debug"), Some("info")), "debug");
    }

    #[test]
    fn test_rust_log_beats_config() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_filter(&config, None, Some("application=trace")), "application=trace");
        assert_eq!(resolve_filter(&config, None, Some("  ")), "warn");
    }

    #[test]
    fn test_config_is_fallback() {
        let config = LoggingConfig {
            filter: "info,integration_transit=debug".to_string(),
            json: true,
        };
        assert_eq!(resolve_filter(&config, None, None), "info,integration_transit=debug");
    }

    #[test]
    fn test_filter_parsing() {
        assert!(build_filter("info,integration_overpass=debug").is_ok());
        let err = build_filter("info,homerun=loud").unwrap_err();
        assert!(err.to_string().contains("homerun=loud"));
    }
}
