use core::str::FromStr;

use serde::{Deserialize, Serialize};

use slotmaster_core::DomainError;

/// Operational status of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    Active,
    Inactive,
    Blocked,
    Reserved,
    Full,
    Decommissioned,
}

impl LocationStatus {
    pub const ALL: [LocationStatus; 6] = [
        LocationStatus::Active,
        LocationStatus::Inactive,
        LocationStatus::Blocked,
        LocationStatus::Reserved,
        LocationStatus::Full,
        LocationStatus::Decommissioned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationStatus::Active => "ACTIVE",
            LocationStatus::Inactive => "INACTIVE",
            LocationStatus::Blocked => "BLOCKED",
            LocationStatus::Reserved => "RESERVED",
            LocationStatus::Full => "FULL",
            LocationStatus::Decommissioned => "DECOMMISSIONED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LocationStatus::Active => "Location is active and available",
            LocationStatus::Inactive => "Location is temporarily inactive",
            LocationStatus::Blocked => "Location is blocked (damage, maintenance)",
            LocationStatus::Reserved => "Location is reserved for specific purpose",
            LocationStatus::Full => "Location is at capacity",
            LocationStatus::Decommissioned => "Location is permanently decommissioned",
        }
    }

    pub fn can_accept_inventory(self) -> bool {
        matches!(self, LocationStatus::Active | LocationStatus::Reserved)
    }

    pub fn can_release_inventory(self) -> bool {
        match self {
            LocationStatus::Active | LocationStatus::Full | LocationStatus::Reserved => true,
            LocationStatus::Inactive | LocationStatus::Blocked | LocationStatus::Decommissioned => {
                false
            }
        }
    }

    pub fn is_operational(self) -> bool {
        matches!(
            self,
            LocationStatus::Active | LocationStatus::Full | LocationStatus::Reserved
        )
    }

    /// Blocked and full locations need an operator.
    pub fn requires_attention(self) -> bool {
        matches!(self, LocationStatus::Blocked | LocationStatus::Full)
    }

    pub fn is_terminal(self) -> bool {
        self == LocationStatus::Decommissioned
    }

    /// Whether a location may move from `self` to `next`.
    ///
    /// Nothing leads out of `Decommissioned`; every other move is left to the
    /// hierarchy-management system.
    pub fn can_transition_to(self, next: LocationStatus) -> bool {
        !self.is_terminal() || next == self
    }
}

impl core::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown location status: {s}")))
    }
}
