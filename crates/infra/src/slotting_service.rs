//! Slotting application service.
//!
//! Composes a [`LocationRepository`], an [`EventBus`] and a [`SlottingEngine`]:
//!
//! ```text
//! load zone from repository
//!   ↓
//! engine pass (pure; mutates the loaded copies only)
//!   ↓
//! save each changed record (optimistic: expects the loaded version)
//!   ↓
//! publish LocationSlottingChanged for that record
//! ```
//!
//! A record is always saved before its event is published. If publishing
//! fails the error is returned and the record stays saved, so delivery is
//! at-least-once; consumers dedupe on the envelope's sequence number.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use slotmaster_core::{AggregateRoot, ExpectedVersion, LocationId, WarehouseId};
use slotmaster_events::{EventBus, EventEnvelope};
use slotmaster_locations::{LocationRecord, LocationSlottingChanged, SlottingClass};
use slotmaster_slotting::{Recommendation, SlottingDistribution, SlottingEngine};

use crate::repository::{LocationRepository, RepositoryError};

pub const LOCATION_AGGREGATE_TYPE: &str = "location";
pub const AUTOMATIC_OPTIMIZATION_REASON: &str = "Automatic slotting optimization";

#[derive(Debug, Error)]
pub enum SlottingServiceError {
    #[error("location not found: {0}")]
    NotFound(LocationId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Publication failed after a successful save (the record is persisted).
    #[error("failed to publish slotting change: {0}")]
    Publish(String),
}

/// Outcome of a warehouse-wide balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlottingBalanceReport {
    pub warehouse_id: WarehouseId,
    /// Distribution of every zone as found before any re-optimization.
    pub distribution_by_zone: BTreeMap<String, SlottingDistribution>,
    pub locations_rebalanced: usize,
}

impl SlottingBalanceReport {
    pub fn zones_needing_rebalancing(&self) -> impl Iterator<Item = &str> {
        self.distribution_by_zone
            .iter()
            .filter(|(_, distribution)| distribution.needs_rebalancing)
            .map(|(zone, _)| zone.as_str())
    }
}

pub struct SlottingService<R, B> {
    repository: R,
    bus: B,
    engine: SlottingEngine,
}

impl<R, B> SlottingService<R, B> {
    pub fn new(repository: R, bus: B, engine: SlottingEngine) -> Self {
        Self {
            repository,
            bus,
            engine,
        }
    }

    pub fn engine(&self) -> &SlottingEngine {
        &self.engine
    }

    pub fn into_parts(self) -> (R, B) {
        (self.repository, self.bus)
    }
}

impl<R, B> SlottingService<R, B>
where
    R: LocationRepository,
    B: EventBus<EventEnvelope<LocationSlottingChanged>>,
{
    /// Reassign every slotting candidate of a zone to the class its distance
    /// calls for. Returns the number of locations changed.
    pub fn optimize_zone_slotting(
        &self,
        warehouse_id: &WarehouseId,
        zone: &str,
        updated_by: &str,
    ) -> Result<usize, SlottingServiceError> {
        let mut locations = self.repository.find_by_zone(warehouse_id, zone)?;
        let changes = self.engine.optimize_zone_with_changes(&mut locations);

        if changes.is_empty() {
            info!(warehouse_id = %warehouse_id, zone, changed = 0, "zone slotting already optimal");
            return Ok(0);
        }

        let previous_by_id: HashMap<&LocationId, SlottingClass> = changes
            .iter()
            .map(|change| (&change.location_id, change.previous_class))
            .collect();

        for mut location in locations {
            let Some(&previous) = previous_by_id.get(location.id_typed()) else {
                continue;
            };

            location.mark_updated_by(updated_by);
            let expected = ExpectedVersion::Exact(location.version());
            let saved = self.repository.save(location, expected)?;

            debug!(
                location_id = %saved.id_typed(),
                from = %previous,
                to = %saved.slotting_class(),
                version = saved.version(),
                "slotting change saved"
            );
            self.publish_change(&saved, previous, updated_by, AUTOMATIC_OPTIMIZATION_REASON)?;
        }

        info!(
            warehouse_id = %warehouse_id,
            zone,
            changed = changes.len(),
            "zone slotting optimized"
        );
        Ok(changes.len())
    }

    /// Explicitly set a location's class. The pick-path sequence is reset to
    /// the class's base sequence. Always saved and published, even when the
    /// class does not change.
    pub fn update_slotting_class(
        &self,
        location_id: &LocationId,
        new_class: SlottingClass,
        updated_by: &str,
        reason: &str,
    ) -> Result<LocationRecord, SlottingServiceError> {
        let mut location = self
            .repository
            .get(location_id)?
            .ok_or_else(|| SlottingServiceError::NotFound(location_id.clone()))?;

        let expected = ExpectedVersion::Exact(location.version());
        let previous = location.assign_slotting_class(new_class);
        location.mark_updated_by(updated_by);

        let saved = self.repository.save(location, expected)?;
        info!(
            location_id = %saved.id_typed(),
            from = %previous,
            to = %new_class,
            reason,
            "slotting class updated"
        );
        self.publish_change(&saved, previous, updated_by, reason)?;
        Ok(saved)
    }

    /// Recommendations for every active storage location of the warehouse.
    pub fn slotting_recommendations(
        &self,
        warehouse_id: &WarehouseId,
    ) -> Result<BTreeMap<LocationId, Recommendation>, SlottingServiceError> {
        let locations = self.repository.find_active_storage(warehouse_id)?;
        Ok(self.engine.recommend(&locations))
    }

    pub fn golden_zone(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, SlottingServiceError> {
        let locations = self.repository.find_by_zone(warehouse_id, zone)?;
        Ok(self.engine.golden_zone(&locations).into_iter().cloned().collect())
    }

    pub fn pick_path(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, SlottingServiceError> {
        let locations = self.repository.find_by_zone(warehouse_id, zone)?;
        Ok(self.engine.pick_path(&locations).into_iter().cloned().collect())
    }

    pub fn zone_distribution(
        &self,
        warehouse_id: &WarehouseId,
        zone: &str,
    ) -> Result<SlottingDistribution, SlottingServiceError> {
        let locations = self.repository.find_by_zone(warehouse_id, zone)?;
        Ok(self.engine.analyze(&locations))
    }

    /// Analyze every zone of the warehouse and re-optimize the ones whose
    /// fast tier is over-allocated.
    pub fn balance_slotting(
        &self,
        warehouse_id: &WarehouseId,
        updated_by: &str,
    ) -> Result<SlottingBalanceReport, SlottingServiceError> {
        let mut distribution_by_zone = BTreeMap::new();
        let mut locations_rebalanced = 0;

        for zone in self.repository.zones(warehouse_id)? {
            let distribution = self.zone_distribution(warehouse_id, &zone)?;

            if distribution.needs_rebalancing {
                warn!(
                    warehouse_id = %warehouse_id,
                    zone = %zone,
                    fast_tier_share = distribution.fast_tier_share(),
                    target = distribution.target_fast_tier_share,
                    "zone slotting needs rebalancing"
                );
                locations_rebalanced += self.optimize_zone_slotting(warehouse_id, &zone, updated_by)?;
            }

            distribution_by_zone.insert(zone, distribution);
        }

        info!(
            warehouse_id = %warehouse_id,
            zones = distribution_by_zone.len(),
            locations_rebalanced,
            "warehouse slotting balanced"
        );
        Ok(SlottingBalanceReport {
            warehouse_id: warehouse_id.clone(),
            distribution_by_zone,
            locations_rebalanced,
        })
    }

    /// Nearest location of `target` class in the zone with room for `required_quantity`.
    pub fn find_optimal_location(
        &self,
        warehouse_id: &WarehouseId,
        zone: &str,
        target: SlottingClass,
        required_quantity: u32,
    ) -> Result<Option<LocationRecord>, SlottingServiceError> {
        let locations = self.repository.find_by_zone(warehouse_id, zone)?;
        Ok(self
            .engine
            .find_optimal_location(&locations, target, required_quantity)
            .cloned())
    }

    fn publish_change(
        &self,
        saved: &LocationRecord,
        previous: SlottingClass,
        updated_by: &str,
        reason: &str,
    ) -> Result<(), SlottingServiceError> {
        let event = LocationSlottingChanged::new(
            saved.id_typed().clone(),
            saved.warehouse_id().clone(),
            saved.zone(),
            previous,
            saved.slotting_class(),
            saved.pick_path_sequence(),
            updated_by,
            reason,
        );
        let envelope = EventEnvelope::new(
            event.event_id,
            saved.warehouse_id().clone(),
            saved.id_typed().clone(),
            LOCATION_AGGREGATE_TYPE,
            saved.version(),
            event,
        );

        self.bus
            .publish(envelope)
            .map_err(|e| SlottingServiceError::Publish(format!("{e:?}")))
    }
}
