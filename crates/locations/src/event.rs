use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use slotmaster_core::{LocationId, WarehouseId};
use slotmaster_events::Event;

use crate::slotting_class::SlottingClass;

/// Event: a location's slotting class changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSlottingChanged {
    pub event_id: Uuid,
    pub location_id: LocationId,
    pub warehouse_id: WarehouseId,
    pub zone: String,
    pub previous_class: SlottingClass,
    pub new_class: SlottingClass,
    pub new_pick_path_sequence: Option<u32>,
    pub occurred_at: DateTime<Utc>,
    pub updated_by: String,
    pub reason: String,
}

impl LocationSlottingChanged {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location_id: LocationId,
        warehouse_id: WarehouseId,
        zone: impl Into<String>,
        previous_class: SlottingClass,
        new_class: SlottingClass,
        new_pick_path_sequence: Option<u32>,
        updated_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            location_id,
            warehouse_id,
            zone: zone.into(),
            previous_class,
            new_class,
            new_pick_path_sequence,
            occurred_at: Utc::now(),
            updated_by: updated_by.into(),
            reason: reason.into(),
        }
    }
}

impl Event for LocationSlottingChanged {
    fn event_type(&self) -> &'static str {
        "locations.location.slotting_changed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_type_and_fresh_id() {
        let make = || {
            LocationSlottingChanged::new(
                LocationId::new("B-1"),
                WarehouseId::new("WH-001"),
                "PICK",
                SlottingClass::Mixed,
                SlottingClass::A,
                Some(2000),
                "planner",
                "manual",
            )
        };
        let first = make();
        let second = make();

        assert_eq!(first.event_type(), "locations.location.slotting_changed");
        assert_eq!(first.version(), 1);
        assert_ne!(first.event_id, second.event_id);
    }

    #[test]
    fn serializes_classes_by_name() {
        let event = LocationSlottingChanged::new(
            LocationId::new("B-1"),
            WarehouseId::new("WH-001"),
            "PICK",
            SlottingClass::B,
            SlottingClass::FastMover,
            Some(1000),
            "optimizer",
            "Automatic slotting optimization",
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["previous_class"], "B");
        assert_eq!(json["new_class"], "FAST_MOVER");
        assert_eq!(json["location_id"], "B-1");
    }
}
