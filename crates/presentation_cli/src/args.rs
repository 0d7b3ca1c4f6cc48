//! Parsing of place and time arguments

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

/// A place given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceArg {
    /// `lat,lon` pair, named by reverse geocoding
    Coordinates {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lon: f64,
    },
    /// Free text resolved by search (first match wins)
    Query(String),
}

impl FromStr for PlaceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err("place must not be empty".to_string());
        }

        let coordinates = text.split_once(',').and_then(|(lat, lon)| {
            let lat = lat.trim().parse::<f64>().ok()?;
            let lon = lon.trim().parse::<f64>().ok()?;
            Some((lat, lon))
        });

        Ok(match coordinates {
            Some((lat, lon)) => Self::Coordinates { lat, lon },
            None => Self::Query(text.to_string()),
        })
    }
}

impl fmt::Display for PlaceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
            Self::Query(text) => f.write_str(text),
        }
    }
}

/// Parse a departure given as RFC 3339 or as `HH:MM` today in local time
pub fn parse_departure(value: &str) -> Result<DateTime<Utc>, String> {
    parse_departure_in(value, &Local, Local::now())
}

fn parse_departure_in<Tz: TimeZone>(
    value: &str,
    zone: &Tz,
    now: DateTime<Tz>,
) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("'{value}' is neither HH:MM nor an RFC 3339 timestamp"))?;
    zone.from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| format!("'{value}' does not exist today in the local time zone"))
}
