//! Location persistence port and its in-memory adapter.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use slotmaster_core::{AggregateRoot, ExpectedVersion, LocationId, WarehouseId};
use slotmaster_locations::{LocationRecord, LocationStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Optimistic concurrency failure: the stored record moved on since it was loaded.
    #[error("concurrency conflict on location {location_id}: expected {expected:?}, found version {actual}")]
    Conflict {
        location_id: LocationId,
        expected: ExpectedVersion,
        actual: u64,
    },

    #[error("location not found: {0}")]
    NotFound(LocationId),

    #[error("location repository lock poisoned")]
    Poisoned,
}

/// Narrow persistence contract the slotting service needs.
///
/// Queries return owned records in ascending id order. `save` bumps the
/// stored version by one and returns the record as stored.
pub trait LocationRepository: Send + Sync {
    fn get(&self, location_id: &LocationId) -> Result<Option<LocationRecord>, RepositoryError>;

    /// Every location of `zone` in the warehouse, whatever its kind or status.
    fn find_by_zone(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, RepositoryError>;

    /// Active storage locations of the warehouse.
    fn find_active_storage(&self, warehouse_id: &WarehouseId) -> Result<Vec<LocationRecord>, RepositoryError>;

    /// Distinct, non-empty zone names of the warehouse, sorted.
    fn zones(&self, warehouse_id: &WarehouseId) -> Result<Vec<String>, RepositoryError>;

    fn save(&self, record: LocationRecord, expected: ExpectedVersion) -> Result<LocationRecord, RepositoryError>;
}

impl<R> LocationRepository for Arc<R>
where
    R: LocationRepository + ?Sized,
{
    fn get(&self, location_id: &LocationId) -> Result<Option<LocationRecord>, RepositoryError> {
        (**self).get(location_id)
    }

    fn find_by_zone(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, RepositoryError> {
        (**self).find_by_zone(warehouse_id, zone)
    }

    fn find_active_storage(&self, warehouse_id: &WarehouseId) -> Result<Vec<LocationRecord>, RepositoryError> {
        (**self).find_active_storage(warehouse_id)
    }

    fn zones(&self, warehouse_id: &WarehouseId) -> Result<Vec<String>, RepositoryError> {
        (**self).zones(warehouse_id)
    }

    fn save(&self, record: LocationRecord, expected: ExpectedVersion) -> Result<LocationRecord, RepositoryError> {
        (**self).save(record, expected)
    }
}

/// In-memory location store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLocationRepository {
    records: RwLock<BTreeMap<LocationId, LocationRecord>>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store every record regardless of version (fixtures, imports).
    pub fn seed(&self, records: impl IntoIterator<Item = LocationRecord>) -> Result<(), RepositoryError> {
        for record in records {
            self.save(record, ExpectedVersion::Any)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filtered(
        &self,
        predicate: impl Fn(&LocationRecord) -> bool,
    ) -> Result<Vec<LocationRecord>, RepositoryError> {
        let map = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.values().filter(|record| predicate(record)).cloned().collect())
    }
}

impl LocationRepository for InMemoryLocationRepository {
    fn get(&self, location_id: &LocationId) -> Result<Option<LocationRecord>, RepositoryError> {
        let map = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.get(location_id).cloned())
    }

    fn find_by_zone(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, RepositoryError> {
        self.filtered(|record| record.warehouse_id() == warehouse_id && record.zone() == zone)
    }

    fn find_active_storage(&self, warehouse_id: &WarehouseId) -> Result<Vec<LocationRecord>, RepositoryError> {
        self.filtered(|record| {
            record.warehouse_id() == warehouse_id
                && record.status() == LocationStatus::Active
                && record.is_storage()
        })
    }

    fn zones(&self, warehouse_id: &WarehouseId) -> Result<Vec<String>, RepositoryError> {
        let map = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        let zones: BTreeSet<&str> = map
            .values()
            .filter(|record| record.warehouse_id() == warehouse_id && !record.zone().is_empty())
            .map(LocationRecord::zone)
            .collect();
        Ok(zones.into_iter().map(str::to_string).collect())
    }

    fn save(&self, mut record: LocationRecord, expected: ExpectedVersion) -> Result<LocationRecord, RepositoryError> {
        let mut map = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        let location_id = record.id_typed().clone();

        let current = match map.get(&location_id) {
            Some(stored) => stored.version(),
            None if matches!(expected, ExpectedVersion::Exact(v) if v > 0) => {
                return Err(RepositoryError::NotFound(location_id));
            }
            None => 0,
        };

        if !expected.matches(current) {
            return Err(RepositoryError::Conflict {
                location_id,
                expected,
                actual: current,
            });
        }

        record.set_version(current + 1);
        map.insert(location_id, record.clone());
        Ok(record)
    }
}
