//! Nearby transport points of interest

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a nearby transport point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// Bus stop or bus stop position
    Bus,
    /// Railway station or halt
    Train,
    /// Bicycle hire dock
    Bike,
    /// Taxi rank
    Taxi,
}

impl StopKind {
    /// All kinds in display order
    pub const ALL: [Self; 4] = [Self::Bus, Self::Train, Self::Bike, Self::Taxi];

    /// Emoji icon
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Bus => "🚌",
            Self::Train => "🚆",
            Self::Bike => "🚲",
            Self::Taxi => "🚕",
        }
    }

    /// Label used when the point has neither a name nor a reference
    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        match self {
            Self::Bus => "Bus Stop",
            Self::Train => "Railway Station",
            Self::Bike => "Cycle Hire",
            Self::Taxi => "Taxi Rank",
        }
    }

    /// Maximum number of points kept per kind
    #[must_use]
    pub const fn cap(&self) -> usize {
        match self {
            Self::Bus => 4,
            Self::Train => 3,
            Self::Bike | Self::Taxi => 2,
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bus => "bus",
            Self::Train => "train",
            Self::Bike => "bike",
            Self::Taxi => "taxi",
        };
        f.write_str(name)
    }
}

/// A classified nearby transport point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    /// Provider element id
    pub id: i64,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Distance from the search origin in meters
    pub dist_m: f64,
    /// Kind
    #[serde(rename = "type")]
    pub kind: StopKind,
    /// Emoji icon
    pub icon: &'static str,
    /// Display label
    pub label: String,
    /// Bus routes serving the stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<String>,
    /// Railway lines or operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<String>,
    /// Bike share network
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Nearby stops grouped by kind
///
/// Each bucket is sorted by ascending distance (ties keep insertion order)
/// and holds at most [`StopKind::cap`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StopIndex {
    bus: Vec<Stop>,
    train: Vec<Stop>,
    bike: Vec<Stop>,
    taxi: Vec<Stop>,
}

impl StopIndex {
    /// Build an index from stops in any order
    #[must_use]
    pub fn from_stops(stops: impl IntoIterator<Item = Stop>) -> Self {
        let mut index = Self::default();
        for stop in stops {
            index.bucket_mut(stop.kind).push(stop);
        }
        for kind in StopKind::ALL {
            let bucket = index.bucket_mut(kind);
            bucket.sort_by(|a, b| a.dist_m.total_cmp(&b.dist_m));
            bucket.truncate(kind.cap());
        }
        index
    }

    /// Stops of one kind, nearest first
    #[must_use]
    pub fn bucket(&self, kind: StopKind) -> &[Stop] {
        match kind {
            StopKind::Bus => &self.bus,
            StopKind::Train => &self.train,
            StopKind::Bike => &self.bike,
            StopKind::Taxi => &self.taxi,
        }
    }

    fn bucket_mut(&mut self, kind: StopKind) -> &mut Vec<Stop> {
        match kind {
            StopKind::Bus => &mut self.bus,
            StopKind::Train => &mut self.train,
            StopKind::Bike => &mut self.bike,
            StopKind::Taxi => &mut self.taxi,
        }
    }

    /// All stops, bucket by bucket in [`StopKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        StopKind::ALL.into_iter().flat_map(|kind| self.bucket(kind))
    }

    /// Total number of stops across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.bus.len() + self.train.len() + self.bike.len() + self.taxi.len()
    }

    /// Whether no stop was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: i64, kind: StopKind, dist_m: f64) -> Stop {
        Stop {
            id,
            lat: 51.5,
            lon: -0.1,
            dist_m,
            kind,
            icon: kind.icon(),
            label: kind.default_label().to_string(),
            routes: None,
            lines: None,
            network: None,
        }
    }

    #[test]
    fn test_kind_caps() {
        assert_eq!(StopKind::Bus.cap(), 4);
        assert_eq!(StopKind::Train.cap(), 3);
        assert_eq!(StopKind::Bike.cap(), 2);
        assert_eq!(StopKind::Taxi.cap(), 2);
    }

    #[test]
    fn test_index_sorts_and_caps() {
        let index = StopIndex::from_stops(vec![
            stop(0, StopKind::Taxi, 100.0),
            stop(1, StopKind::Taxi, 90.0),
            stop(2, StopKind::Taxi, 80.0),
            stop(3, StopKind::Taxi, 70.0),
            stop(4, StopKind::Taxi, 60.0),
        ]);
        let taxis = index.bucket(StopKind::Taxi);
        assert_eq!(taxis.len(), 2);
        assert_eq!(taxis[0].id, 4);
        assert_eq!(taxis[1].id, 3);
    }

    #[test]
    fn test_index_ties_keep_input_order() {
        let index = StopIndex::from_stops(vec![
            stop(1, StopKind::Train, 200.0),
            stop(2, StopKind::Train, 100.0),
            stop(3, StopKind::Train, 100.0),
        ]);
        let ids: Vec<i64> = index.bucket(StopKind::Train).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_index_iter_and_len() {
        let index = StopIndex::from_stops(vec![
            stop(1, StopKind::Taxi, 10.0),
            stop(2, StopKind::Bus, 20.0),
        ]);
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        let kinds: Vec<StopKind> = index.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StopKind::Bus, StopKind::Taxi]);
        assert!(StopIndex::default().is_empty());
    }

    #[test]
    fn test_stop_serializes_kind_as_type() {
        let json = serde_json::to_value(stop(7, StopKind::Bike, 1.0)).expect("serialize");
        assert_eq!(json["type"], "bike");
        assert!(json.get("network").is_none());
    }
}
