//! Points of interest port
//!
//! Raw map elements around a point. Classification happens in
//! [`crate::services::classify`].

use std::collections::HashMap;

use async_trait::async_trait;
use domain::Location;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A raw map element with its tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoElement {
    /// Map element id
    pub id: i64,
    /// Latitude, absent for some element types
    pub lat: Option<f64>,
    /// Longitude, absent for some element types
    pub lon: Option<f64>,
    /// Key/value tags
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl GeoElement {
    /// Non-empty value of a tag
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Whether a tag has exactly this value
    #[must_use]
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tags.get(key).is_some_and(|v| v == value)
    }
}

/// Port for nearby point-of-interest queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiQueryPort: Send + Sync {
    /// Transport-related elements around the origin
    async fn nearby(&self, origin: &Location) -> Result<Vec<GeoElement>, ApplicationError>;
}
