use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use slotmaster_core::{AggregateRoot, DomainError, DomainResult, LocationId, WarehouseId};

use crate::capacity::Capacity;
use crate::dimensions::Dimensions;
use crate::kind::LocationKind;
use crate::slotting_class::SlottingClass;
use crate::status::LocationStatus;

/// Gap between the base pick-path sequences of consecutive class priorities.
///
/// Leaves room for finer physical-position tie-breaks inside one class.
pub const PICK_PATH_SEQUENCE_STEP: u32 = 1000;

/// Aisle / bay / level / position address of a location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhysicalAddress {
    pub aisle: Option<String>,
    pub bay: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
}

impl PhysicalAddress {
    pub fn new(aisle: impl Into<String>, bay: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            aisle: Some(aisle.into()),
            bay: Some(bay.into()),
            level: Some(level.into()),
            position: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// One location in the warehouse hierarchy, as seen by the slotting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    id: LocationId,
    warehouse_id: WarehouseId,
    name: String,
    kind: LocationKind,
    status: LocationStatus,

    parent_id: Option<LocationId>,
    hierarchy_level: u8,
    zone: String,
    address: PhysicalAddress,

    dimensions: Option<Dimensions>,
    capacity: Option<Capacity>,

    slotting_class: SlottingClass,
    distance_from_dock: Option<u32>,
    pick_path_sequence: Option<u32>,

    version: u64,
    updated_at: DateTime<Utc>,
    updated_by: Option<String>,
}

impl LocationRecord {
    /// A new, active, never-saved location of class `Mixed` at its kind's depth.
    pub fn new(
        id: LocationId,
        warehouse_id: WarehouseId,
        name: impl Into<String>,
        kind: LocationKind,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            warehouse_id,
            name: name.into(),
            kind,
            status: LocationStatus::Active,
            parent_id: None,
            hierarchy_level: kind.hierarchy_depth(),
            zone: zone.into(),
            address: PhysicalAddress::default(),
            dimensions: None,
            capacity: None,
            slotting_class: SlottingClass::Mixed,
            distance_from_dock: None,
            pick_path_sequence: None,
            version: 0,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }

    pub fn with_parent(mut self, parent_id: LocationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_hierarchy_level(mut self, level: u8) -> Self {
        self.hierarchy_level = level;
        self
    }

    pub fn with_status(mut self, status: LocationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_address(mut self, address: PhysicalAddress) -> Self {
        self.address = address;
        self
    }

    pub fn with_distance_from_dock(mut self, distance: u32) -> Self {
        self.distance_from_dock = Some(distance);
        self
    }

    /// Assign a class; the pick-path sequence follows it.
    pub fn with_slotting_class(mut self, class: SlottingClass) -> Self {
        self.assign_slotting_class(class);
        self
    }

    /// Manual pick-path override; apply after `with_slotting_class`.
    pub fn with_pick_path_sequence(mut self, sequence: u32) -> Self {
        self.pick_path_sequence = Some(sequence);
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn id_typed(&self) -> &LocationId {
        &self.id
    }

    pub fn warehouse_id(&self) -> &WarehouseId {
        &self.warehouse_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn status(&self) -> LocationStatus {
        self.status
    }

    pub fn parent_id(&self) -> Option<&LocationId> {
        self.parent_id.as_ref()
    }

    pub fn hierarchy_level(&self) -> u8 {
        self.hierarchy_level
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn address(&self) -> &PhysicalAddress {
        &self.address
    }

    pub fn dimensions(&self) -> Option<&Dimensions> {
        self.dimensions.as_ref()
    }

    pub fn capacity(&self) -> Option<&Capacity> {
        self.capacity.as_ref()
    }

    pub fn slotting_class(&self) -> SlottingClass {
        self.slotting_class
    }

    pub fn distance_from_dock(&self) -> Option<u32> {
        self.distance_from_dock
    }

    pub fn pick_path_sequence(&self) -> Option<u32> {
        self.pick_path_sequence
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn updated_by(&self) -> Option<&str> {
        self.updated_by.as_deref()
    }

    pub fn is_storage(&self) -> bool {
        self.kind.can_store_inventory()
    }

    pub fn is_decommissioned(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn can_accept_inventory(&self) -> bool {
        self.status.can_accept_inventory() && self.kind.can_store_inventory()
    }

    pub fn can_have_children(&self) -> bool {
        self.kind.can_hold_children()
    }

    /// Active storage location with a surveyed distance: the input set of
    /// every distance-driven slotting computation.
    pub fn is_slotting_candidate(&self) -> bool {
        self.status == LocationStatus::Active
            && self.kind.can_store_inventory()
            && self.distance_from_dock.is_some()
    }

    /// Reassign the slotting class and reset the pick-path sequence to the
    /// class's base sequence. Returns the previous class.
    pub fn assign_slotting_class(&mut self, class: SlottingClass) -> SlottingClass {
        let previous = self.slotting_class;
        self.slotting_class = class;
        self.pick_path_sequence = Some(class.pick_path_priority() * PICK_PATH_SEQUENCE_STEP);
        self.touch();
        previous
    }

    /// Manual pick-path override. Survives until the next class change.
    pub fn set_pick_path_sequence(&mut self, sequence: Option<u32>) {
        self.pick_path_sequence = sequence;
        self.touch();
    }

    pub fn set_distance_from_dock(&mut self, distance: Option<u32>) {
        self.distance_from_dock = distance;
        self.touch();
    }

    pub fn set_address(&mut self, address: PhysicalAddress) {
        self.address = address;
        self.touch();
    }

    pub fn configure_capacity(&mut self, capacity: Capacity) {
        self.capacity = Some(capacity);
        self.touch();
    }

    pub fn configure_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = Some(dimensions);
        self.touch();
    }

    pub fn change_status(&mut self, next: LocationStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invariant(format!(
                "location {} is {} and cannot become {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    pub fn mark_updated_by(&mut self, user: impl Into<String>) {
        self.updated_by = Some(user.into());
    }

    /// Record the version a persistence adapter stored this record at.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Check that hierarchy level, kind and parent agree.
    pub fn check_hierarchy(&self) -> DomainResult<()> {
        let expected = self.kind.hierarchy_depth();
        if self.hierarchy_level != expected {
            return Err(DomainError::invariant(format!(
                "hierarchy level {} does not match kind {} (expected {})",
                self.hierarchy_level, self.kind, expected
            )));
        }
        if self.hierarchy_level > 0 && self.parent_id.is_none() {
            return Err(DomainError::invariant("non-root location must have a parent"));
        }
        if self.hierarchy_level == 0 && self.parent_id.is_some() {
            return Err(DomainError::invariant("root location cannot have a parent"));
        }
        Ok(())
    }

    /// `name/aisle/bay/level/position`, skipping unset components.
    pub fn full_path(&self) -> String {
        let mut path = self.name.clone();
        for part in [
            &self.address.aisle,
            &self.address.bay,
            &self.address.level,
            &self.address.position,
        ]
        .into_iter()
        .flatten()
        {
            path.push('/');
            path.push_str(part);
        }
        path
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl AggregateRoot for LocationRecord {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl core::fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Location[id={}, name={}, kind={}, status={}, zone={}]",
            self.id, self.name, self.kind, self.status, self.zone
        )
    }
}
