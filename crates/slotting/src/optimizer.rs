use serde::{Deserialize, Serialize};
use tracing::debug;

use slotmaster_core::LocationId;
use slotmaster_locations::{LocationRecord, SlottingClass};

use crate::classifier::Classifier;

/// One class reassignment made by a zone pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlottingChange {
    pub location_id: LocationId,
    pub previous_class: SlottingClass,
    pub new_class: SlottingClass,
    pub new_pick_path_sequence: Option<u32>,
}

/// Reassigns every slotting candidate of a zone to the class its distance
/// calls for.
///
/// This is the only engine component that mutates records. Records that are
/// not candidates (not active, not storage, no distance) are left untouched,
/// and a second pass over the same slice changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneOptimizer {
    classifier: Classifier,
}

impl ZoneOptimizer {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Number of locations whose class changed.
    pub fn optimize_zone(&self, locations: &mut [LocationRecord]) -> usize {
        self.optimize_zone_with_changes(locations).len()
    }

    pub fn optimize_zone_with_changes(&self, locations: &mut [LocationRecord]) -> Vec<SlottingChange> {
        let mut changes = Vec::new();

        for location in locations.iter_mut() {
            if !location.is_slotting_candidate() {
                continue;
            }
            let Some(distance) = location.distance_from_dock() else {
                continue;
            };

            let recommended = self.classifier.classify(distance);
            if recommended == location.slotting_class() {
                continue;
            }

            let previous = location.assign_slotting_class(recommended);
            debug!(
                location_id = %location.id_typed(),
                distance,
                from = %previous,
                to = %recommended,
                "slotting class reassigned"
            );

            changes.push(SlottingChange {
                location_id: location.id_typed().clone(),
                previous_class: previous,
                new_class: recommended,
                new_pick_path_sequence: location.pick_path_sequence(),
            });
        }

        changes
    }
}
