//! Travel modes and their visual styles
//!
//! Styles are looked up from closed enums. Provider-supplied transit mode
//! strings are mapped onto [`LegMode`] once, with an explicit generic entry
//! for anything unrecognised.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon and colour used to present a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStyle {
    /// Emoji icon
    pub icon: &'static str,
    /// CSS hex colour
    pub color: &'static str,
}

impl ModeStyle {
    const WALK: Self = Self {
        icon: "🚶",
        color: "#00e676",
    };
    const CYCLE: Self = Self {
        icon: "🚴",
        color: "#b388ff",
    };
    const DRIVE: Self = Self {
        icon: "🚗",
        color: "#82b1ff",
    };
    const TAXI: Self = Self {
        icon: "🚕",
        color: "#ff9100",
    };
    const TRANSIT: Self = Self {
        icon: "🚌",
        color: "#ffc107",
    };
    /// Style of the "Arrive at destination" step
    pub const ARRIVE: Self = Self {
        icon: "📍",
        color: "#ffc107",
    };
}

/// Mode of a whole route candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// On foot
    Walk,
    /// By bicycle
    Cycle,
    /// Private car
    Drive,
    /// Taxi (derived from the driving route)
    Taxi,
    /// Public transit
    Transit,
}

impl TravelMode {
    /// Lowercase identifier, also used as the route id
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Cycle => "cycle",
            Self::Drive => "drive",
            Self::Taxi => "taxi",
            Self::Transit => "transit",
        }
    }

    /// Icon and colour for this mode
    #[must_use]
    pub const fn style(&self) -> ModeStyle {
        match self {
            Self::Walk => ModeStyle::WALK,
            Self::Cycle => ModeStyle::CYCLE,
            Self::Drive => ModeStyle::DRIVE,
            Self::Taxi => ModeStyle::TAXI,
            Self::Transit => ModeStyle::TRANSIT,
        }
    }

    /// Title shown on a route card
    #[must_use]
    pub const fn route_label(&self) -> &'static str {
        match self {
            Self::Walk => "Walking",
            Self::Cycle => "Cycling",
            Self::Drive => "Drive",
            Self::Taxi => "Taxi",
            Self::Transit => "Transit",
        }
    }

    /// Short verb-like label used for legs and summaries
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Cycle => "Cycle",
            Self::Drive => "Drive",
            Self::Taxi => "Taxi",
            Self::Transit => "Transit",
        }
    }

    /// Matching leg mode
    #[must_use]
    pub const fn leg_mode(&self) -> LegMode {
        match self {
            Self::Walk => LegMode::Walk,
            Self::Cycle => LegMode::Cycle,
            Self::Drive => LegMode::Drive,
            Self::Taxi => LegMode::Taxi,
            Self::Transit => LegMode::Transit,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route_label())
    }
}

/// Mode of a single leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
    /// On foot
    Walk,
    /// By bicycle
    Cycle,
    /// Private car
    Drive,
    /// Taxi
    Taxi,
    /// Bus or coach
    Bus,
    /// Heavy rail
    Rail,
    /// Metro / underground
    Subway,
    /// Tram / light rail
    Tram,
    /// Ferry
    Ferry,
    /// Any other public transport
    Transit,
}

impl LegMode {
    /// Map a transit provider mode string (e.g. `"BUS"`, `"REGIONAL_RAIL"`)
    ///
    /// Matching is case-insensitive; unknown strings map to [`LegMode::Transit`].
    #[must_use]
    pub fn from_provider(mode: &str) -> Self {
        match mode.to_ascii_uppercase().as_str() {
            "WALK" | "FOOT" => Self::Walk,
            "BUS" | "COACH" => Self::Bus,
            "RAIL" | "REGIONAL_RAIL" | "REGIONAL_FAST_RAIL" | "HIGHSPEED_RAIL"
            | "LONG_DISTANCE" | "NIGHT_RAIL" | "SUBURBAN" => Self::Rail,
            "SUBWAY" | "METRO" => Self::Subway,
            "TRAM" => Self::Tram,
            "FERRY" => Self::Ferry,
            _ => Self::Transit,
        }
    }

    /// Icon and colour for this leg mode
    #[must_use]
    pub const fn style(&self) -> ModeStyle {
        match self {
            Self::Walk => ModeStyle::WALK,
            Self::Cycle => ModeStyle::CYCLE,
            Self::Drive => ModeStyle::DRIVE,
            Self::Taxi => ModeStyle::TAXI,
            Self::Rail => ModeStyle {
                icon: "🚆",
                color: "#00e5ff",
            },
            Self::Subway => ModeStyle {
                icon: "🚇",
                color: "#00e5ff",
            },
            Self::Tram => ModeStyle {
                icon: "🚋",
                color: "#ff9100",
            },
            Self::Ferry => ModeStyle {
                icon: "⛴️",
                color: "#ffc107",
            },
            Self::Bus | Self::Transit => ModeStyle::TRANSIT,
        }
    }

    /// Whether this leg is travelled on foot
    #[must_use]
    pub const fn is_walking(&self) -> bool {
        matches!(self, Self::Walk)
    }
}
