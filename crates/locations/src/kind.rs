use core::str::FromStr;

use serde::{Deserialize, Serialize};

use slotmaster_core::DomainError;

/// Kind of location in the warehouse hierarchy.
///
/// Each kind carries fixed capabilities: whether it can contain child
/// locations, whether it can hold inventory, and its depth in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Warehouse,
    Zone,
    Aisle,
    Bay,
    Level,
    Bin,
    Door,
    Staging,
    WorkStation,
}

impl LocationKind {
    pub const ALL: [LocationKind; 9] = [
        LocationKind::Warehouse,
        LocationKind::Zone,
        LocationKind::Aisle,
        LocationKind::Bay,
        LocationKind::Level,
        LocationKind::Bin,
        LocationKind::Door,
        LocationKind::Staging,
        LocationKind::WorkStation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Warehouse => "WAREHOUSE",
            LocationKind::Zone => "ZONE",
            LocationKind::Aisle => "AISLE",
            LocationKind::Bay => "BAY",
            LocationKind::Level => "LEVEL",
            LocationKind::Bin => "BIN",
            LocationKind::Door => "DOOR",
            LocationKind::Staging => "STAGING",
            LocationKind::WorkStation => "WORK_STATION",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LocationKind::Warehouse => "Warehouse facility",
            LocationKind::Zone => "Functional zone within warehouse",
            LocationKind::Aisle => "Storage aisle",
            LocationKind::Bay => "Storage bay within aisle",
            LocationKind::Level => "Storage level/shelf",
            LocationKind::Bin => "Individual storage bin/position",
            LocationKind::Door => "Shipping/receiving door",
            LocationKind::Staging => "Staging area",
            LocationKind::WorkStation => "Work station/put wall",
        }
    }

    pub fn can_hold_children(self) -> bool {
        match self {
            LocationKind::Warehouse
            | LocationKind::Zone
            | LocationKind::Aisle
            | LocationKind::Bay
            | LocationKind::Level => true,
            LocationKind::Bin
            | LocationKind::Door
            | LocationKind::Staging
            | LocationKind::WorkStation => false,
        }
    }

    pub fn can_store_inventory(self) -> bool {
        match self {
            LocationKind::Bin | LocationKind::Staging => true,
            LocationKind::Warehouse
            | LocationKind::Zone
            | LocationKind::Aisle
            | LocationKind::Bay
            | LocationKind::Level
            | LocationKind::Door
            | LocationKind::WorkStation => false,
        }
    }

    /// Depth in the hierarchy (0 = root).
    pub fn hierarchy_depth(self) -> u8 {
        match self {
            LocationKind::Warehouse => 0,
            LocationKind::Zone | LocationKind::Door => 1,
            LocationKind::Aisle | LocationKind::Staging | LocationKind::WorkStation => 2,
            LocationKind::Bay => 3,
            LocationKind::Level => 4,
            LocationKind::Bin => 5,
        }
    }

    /// Kind a location of this kind is usually nested under.
    pub fn typical_parent(self) -> Option<LocationKind> {
        match self {
            LocationKind::Warehouse => None,
            LocationKind::Zone | LocationKind::Door => Some(LocationKind::Warehouse),
            LocationKind::Aisle | LocationKind::Staging | LocationKind::WorkStation => {
                Some(LocationKind::Zone)
            }
            LocationKind::Bay => Some(LocationKind::Aisle),
            LocationKind::Level => Some(LocationKind::Bay),
            LocationKind::Bin => Some(LocationKind::Level),
        }
    }
}

impl core::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown location kind: {s}")))
    }
}
