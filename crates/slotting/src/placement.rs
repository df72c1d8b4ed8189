use slotmaster_locations::{LocationRecord, SlottingClass};

/// Nearest storage location of class `target` that can take `required_quantity` more units.
///
/// Candidates must accept inventory (active or reserved) and have a
/// configured capacity. Nearest means lowest distance from dock, then lowest
/// pick-path sequence; unknown values sort last.
pub fn find_optimal_location(
    locations: &[LocationRecord],
    target: SlottingClass,
    required_quantity: u32,
) -> Option<&LocationRecord> {
    let mut candidates: Vec<&LocationRecord> = locations
        .iter()
        .filter(|location| location.can_accept_inventory() && location.slotting_class() == target)
        .collect();

    candidates.sort_by_key(|location| {
        (
            location.distance_from_dock().is_none(),
            location.distance_from_dock(),
            location.pick_path_sequence().is_none(),
            location.pick_path_sequence(),
        )
    });

    candidates.into_iter().find(|location| {
        location
            .capacity()
            .is_some_and(|capacity| capacity.available_quantity() >= required_quantity)
    })
}
