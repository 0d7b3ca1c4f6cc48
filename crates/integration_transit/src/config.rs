//! Transit service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Transitous journey planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL of the planner API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of itineraries requested per plan
    #[serde(default = "default_max_itineraries")]
    pub max_itineraries: u8,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.transitous.org/api/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_itineraries() -> u8 {
    4
}

fn default_user_agent() -> String {
    "HOMERUN-transit-navigator/1.0".to_string()
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_itineraries: default_max_itineraries(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_itineraries: 2,
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

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_itineraries == 0 {
            return Err("max_itineraries must be greater than 0".to_string());
        }

        if self.max_itineraries > 10 {
            return Err("max_itineraries must be 10 or less".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransitConfig::default();
        assert_eq!(config.base_url, "https://api.transitous.org/api/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_itineraries, 4);
    }

    #[test]
    fn test_testing_config() {
        let config = TransitConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_itineraries, 2);
    }

    #[test]
    fn test_validation_success() {
        assert!(TransitConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = TransitConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = TransitConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_itinerary_bounds() {
        let none = TransitConfig {
            max_itineraries: 0,
            ..Default::default()
        };
        assert!(none.validate().is_err());

        let too_many = TransitConfig {
            max_itineraries: 11,
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = TransitConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: TransitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.max_itineraries, config.max_itineraries);
        assert_eq!(deserialized.base_url, config.base_url);
    }
}
