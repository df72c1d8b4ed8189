use core::cmp::Ordering;

use slotmaster_locations::{LocationRecord, LocationStatus};

/// Orders a zone's active storage locations into a picking route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickPathSequencer;

impl PickPathSequencer {
    pub fn order<'a>(&self, locations: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        let mut route: Vec<&LocationRecord> = locations
            .iter()
            .filter(|location| location.status() == LocationStatus::Active && location.is_storage())
            .collect();
        route.sort_by(|a, b| compare_for_pick_path(a, b));
        route
    }
}

/// Total pick-path order: class priority, distance from dock (unknown last),
/// aisle, bay, level, position, then id.
pub fn compare_for_pick_path(a: &LocationRecord, b: &LocationRecord) -> Ordering {
    a.slotting_class()
        .pick_path_priority()
        .cmp(&b.slotting_class().pick_path_priority())
        .then_with(|| distance_key(a).cmp(&distance_key(b)))
        .then_with(|| component(&a.address().aisle).cmp(component(&b.address().aisle)))
        .then_with(|| component(&a.address().bay).cmp(component(&b.address().bay)))
        .then_with(|| component(&a.address().level).cmp(component(&b.address().level)))
        .then_with(|| component(&a.address().position).cmp(component(&b.address().position)))
        .then_with(|| a.id_typed().cmp(b.id_typed()))
}

fn distance_key(location: &LocationRecord) -> (bool, u32) {
    match location.distance_from_dock() {
        Some(distance) => (false, distance),
        None => (true, 0),
    }
}

fn component(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
