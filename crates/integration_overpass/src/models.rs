//! Overpass response models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw OpenStreetMap element returned by the interpreter
///
/// Only nodes are queried, but ways and relations without coordinates can
/// still be returned by custom queries, so `lat` and `lon` are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassElement {
    /// OSM element id
    pub id: i64,
    /// Element type (`node`, `way`, `relation`)
    #[serde(rename = "type", default)]
    pub element_type: String,
    /// Latitude in degrees
    pub lat: Option<f64>,
    /// Longitude in degrees
    pub lon: Option<f64>,
    /// OSM tags
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Interpreter response envelope
///
/// Elements stay untyped here so one malformed element cannot reject the batch.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
    /// Runtime errors are reported in-band with a 200 status
    pub remark: Option<String>,
}
