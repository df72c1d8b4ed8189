use core::str::FromStr;

use serde::{Deserialize, Serialize};

use slotmaster_core::{DomainError, ValueObject};

/// Velocity (ABC) classification assigned to a storage location.
///
/// Declaration order is the fastest-to-slowest reporting order used by
/// `Ord`; pick-path order comes from [`SlottingClass::pick_path_priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlottingClass {
    FastMover,
    A,
    B,
    C,
    SlowMover,
    Seasonal,
    Hazmat,
    Oversized,
    Mixed,
}

impl ValueObject for SlottingClass {}

impl SlottingClass {
    pub const ALL: [SlottingClass; 9] = [
        SlottingClass::FastMover,
        SlottingClass::A,
        SlottingClass::B,
        SlottingClass::C,
        SlottingClass::SlowMover,
        SlottingClass::Seasonal,
        SlottingClass::Hazmat,
        SlottingClass::Oversized,
        SlottingClass::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlottingClass::FastMover => "FAST_MOVER",
            SlottingClass::A => "A",
            SlottingClass::B => "B",
            SlottingClass::C => "C",
            SlottingClass::SlowMover => "SLOW_MOVER",
            SlottingClass::Seasonal => "SEASONAL",
            SlottingClass::Hazmat => "HAZMAT",
            SlottingClass::Oversized => "OVERSIZED",
            SlottingClass::Mixed => "MIXED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SlottingClass::FastMover => "Very high velocity - critical items",
            SlottingClass::A => "High velocity - 80% of picks, 20% of SKUs",
            SlottingClass::B => "Medium velocity - 15% of picks, 30% of SKUs",
            SlottingClass::C => "Low velocity - 5% of picks, 50% of SKUs",
            SlottingClass::SlowMover => "Very low velocity - rare picks",
            SlottingClass::Seasonal => "Seasonal items",
            SlottingClass::Hazmat => "Hazardous materials",
            SlottingClass::Oversized => "Oversized items requiring special handling",
            SlottingClass::Mixed => "Mixed velocity items",
        }
    }

    /// Pick-path priority (lower = visited earlier).
    pub fn pick_path_priority(self) -> u32 {
        match self {
            SlottingClass::FastMover => 1,
            SlottingClass::A => 2,
            SlottingClass::B | SlottingClass::Seasonal | SlottingClass::Mixed => 3,
            SlottingClass::C => 4,
            SlottingClass::SlowMover => 5,
            SlottingClass::Hazmat | SlottingClass::Oversized => 6,
        }
    }

    /// Rank of the distance band this class ideally occupies (1 = nearest the dock).
    ///
    /// Only used to score recommendation confidence; it is not a distance.
    pub fn ideal_distance_band(self) -> u32 {
        match self {
            SlottingClass::FastMover | SlottingClass::A => 1,
            SlottingClass::B | SlottingClass::Seasonal | SlottingClass::Mixed => 2,
            SlottingClass::C => 3,
            SlottingClass::SlowMover | SlottingClass::Oversized => 4,
            SlottingClass::Hazmat => 5,
        }
    }

    pub fn requires_special_handling(self) -> bool {
        matches!(self, SlottingClass::Hazmat | SlottingClass::Oversized)
    }

    /// Fast tier = the classes a Pareto-shaped zone keeps to roughly a fifth of its slots.
    pub fn is_fast_tier(self) -> bool {
        matches!(self, SlottingClass::FastMover | SlottingClass::A)
    }
}

impl core::fmt::Display for SlottingClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlottingClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown slotting class: {s}")))
    }
}
