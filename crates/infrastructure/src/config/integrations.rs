//! Provider sections that add settings on top of the client configs

use integration_transit::NominatimConfig;
use serde::{Deserialize, Serialize};

/// Geocoding section: Nominatim client settings plus the search result limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Search cache TTL in hours, 0 disables caching (default: 24)
    #[serde(default = "default_geocoding_cache_ttl")]
    pub cache_ttl_hours: u64,

    /// Comma separated country codes restricting search (default: none)
    #[serde(default)]
    pub country_filter: String,

    /// User-Agent header (default: HOMERUN-transit-navigator/1.0)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum search candidates shown (default: 5)
    #[serde(default = "default_search_limit")]
    pub search_limit: u8,
}

fn default_geocoding_base_url() -> String {
    NominatimConfig::default().base_url
}

const fn default_geocoding_timeout() -> u64 {
    5
}

const fn default_geocoding_cache_ttl() -> u64 {
    24
}

fn default_user_agent() -> String {
    NominatimConfig::default().user_agent
}

const fn default_search_limit() -> u8 {
    5
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            cache_ttl_hours: default_geocoding_cache_ttl(),
            country_filter: String::new(),
            user_agent: default_user_agent(),
            search_limit: default_search_limit(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_transit::NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_hours: self.cache_ttl_hours,
            country_filter: self.country_filter.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.to_nominatim_config().validate()?;
        if self.search_limit == 0 || self.search_limit > 50 {
            return Err("search_limit must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_client_defaults() {
        let config = GeocodingAppConfig::default();
        let nominatim = NominatimConfig::default();
        assert_eq!(config.base_url, nominatim.base_url);
        assert_eq!(config.timeout_secs, nominatim.timeout_secs);
        assert_eq!(config.cache_ttl_hours, nominatim.cache_ttl_hours);
        assert_eq!(config.search_limit, 5);
    }

    #[test]
    fn test_to_nominatim_config() {
        let config = GeocodingAppConfig {
            country_filter: "gb,ie".to_string(),
            cache_ttl_hours: 0,
            ..Default::default()
        };
        let nominatim = config.to_nominatim_config();
        assert_eq!(nominatim.country_filter, "gb,ie");
        assert_eq!(nominatim.cache_ttl_hours, 0);
    }

    #[test]
    fn test_search_limit_validated() {
        let config = GeocodingAppConfig {
            search_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
