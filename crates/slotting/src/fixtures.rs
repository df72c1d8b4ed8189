use slotmaster_core::{LocationId, WarehouseId};
use slotmaster_locations::{LocationKind, LocationRecord, PhysicalAddress};

pub(crate) fn bin(id: &str) -> LocationRecord {
    LocationRecord::new(
        LocationId::new(id),
        WarehouseId::new("WH-001"),
        format!("Bin {id}"),
        LocationKind::Bin,
        "PICK",
    )
    .with_parent(LocationId::new("LVL-1"))
}

pub(crate) fn bin_at(id: &str, distance: u32) -> LocationRecord {
    bin(id).with_distance_from_dock(distance)
}

/// Non-storage location with a surveyed distance.
pub(crate) fn aisle(id: &str, distance: u32) -> LocationRecord {
    LocationRecord::new(
        LocationId::new(id),
        WarehouseId::new("WH-001"),
        format!("Aisle {id}"),
        LocationKind::Aisle,
        "PICK",
    )
    .with_parent(LocationId::new("ZONE-PICK"))
    .with_distance_from_dock(distance)
}

pub(crate) fn addressed(id: &str, aisle: &str, bay: &str, level: &str) -> LocationRecord {
    bin(id).with_address(PhysicalAddress::new(aisle, bay, level))
}

pub(crate) fn ids<'a>(records: impl IntoIterator<Item = &'a LocationRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.id_typed().as_str()).collect()
}
