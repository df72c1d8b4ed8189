//! Integration tests for the slotting pipeline.
//!
//! Tests: Repository → SlottingEngine → Repository.save → EventBus
//!
//! Verifies:
//! - Zone passes persist every change and publish one event per change
//! - Reports are read-only
//! - Optimistic concurrency conflicts and publish failures are surfaced

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use slotmaster_core::{AggregateRoot, ExpectedVersion, LocationId, WarehouseId};
    use slotmaster_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription};
    use slotmaster_locations::{
        Capacity, LocationKind, LocationRecord, LocationSlottingChanged, LocationStatus, SlottingClass,
    };
    use slotmaster_slotting::{SlottingConfig, SlottingEngine};

    use crate::repository::{InMemoryLocationRepository, LocationRepository, RepositoryError};
    use crate::slotting_service::{
        AUTOMATIC_OPTIMIZATION_REASON, LOCATION_AGGREGATE_TYPE, SlottingService, SlottingServiceError,
    };

    type Envelope = EventEnvelope<LocationSlottingChanged>;
    type Service = SlottingService<Arc<InMemoryLocationRepository>, Arc<InMemoryEventBus<Envelope>>>;

    fn warehouse() -> WarehouseId {
        WarehouseId::new("WH-001")
    }

    fn bin(id: &str, zone: &str, distance: Option<u32>) -> LocationRecord {
        let record = LocationRecord::new(
            LocationId::new(id),
            warehouse(),
            format!("Bin {id}"),
            LocationKind::Bin,
            zone,
        )
        .with_parent(LocationId::new(format!("LVL-{zone}")));
        match distance {
            Some(distance) => record.with_distance_from_dock(distance),
            None => record,
        }
    }

    fn setup(records: Vec<LocationRecord>) -> (Service, Arc<InMemoryLocationRepository>, Subscription<Envelope>) {
        slotmaster_observability::init();

        let repository = Arc::new(InMemoryLocationRepository::new());
        repository.seed(records).unwrap();
        let bus: Arc<InMemoryEventBus<Envelope>> = Arc::new(InMemoryEventBus::new());
        let subscription = bus.subscribe();

        let service = SlottingService::new(repository.clone(), bus, SlottingEngine::default());
        (service, repository, subscription)
    }

    fn stored(repository: &InMemoryLocationRepository, id: &str) -> LocationRecord {
        repository.get(&LocationId::new(id)).unwrap().unwrap()
    }

    #[test]
    fn zone_pass_persists_and_publishes_each_change() -> anyhow::Result<()> {
        let (service, repository, subscription) = setup(vec![
            bin("A", "PICK", Some(15)),
            bin("B", "PICK", Some(35)),
            bin("C", "PICK", Some(120)),
            bin("D", "PICK", None),
            bin("X", "BULK", Some(5)),
        ]);

        let changed = service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer")?;
        assert_eq!(changed, 3);

        let a = stored(&repository, "A");
        assert_eq!(a.slotting_class(), SlottingClass::FastMover);
        assert_eq!(a.pick_path_sequence(), Some(1000));
        assert_eq!(a.version(), 2);
        assert_eq!(a.updated_by(), Some("optimizer"));
        assert_eq!(stored(&repository, "D").version(), 1);
        assert_eq!(stored(&repository, "X").slotting_class(), SlottingClass::Mixed);

        let events = subscription.drain();
        assert_eq!(events.len(), 3);
        for envelope in &events {
            assert_eq!(envelope.aggregate_type(), LOCATION_AGGREGATE_TYPE);
            assert_eq!(envelope.sequence_number(), 2);
            assert_eq!(envelope.event_id(), envelope.payload().event_id);
            assert_eq!(envelope.payload().reason, AUTOMATIC_OPTIMIZATION_REASON);
            assert_eq!(envelope.payload().previous_class, SlottingClass::Mixed);
            assert_eq!(envelope.payload().zone, "PICK");
        }
        let classes: Vec<_> = events.iter().map(|e| e.payload().new_class).collect();
        assert_eq!(classes, vec![SlottingClass::FastMover, SlottingClass::A, SlottingClass::C]);
        Ok(())
    }

    #[test]
    fn second_pass_is_silent() -> anyhow::Result<()> {
        let (service, _repository, subscription) =
            setup(vec![bin("A", "PICK", Some(15)), bin("B", "PICK", Some(250))]);

        assert_eq!(service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer")?, 2);
        subscription.drain();

        assert_eq!(service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer")?, 0);
        assert!(subscription.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn reports_do_not_mutate_the_repository() -> anyhow::Result<()> {
        let (service, repository, subscription) = setup(vec![
            bin("A", "PICK", Some(15)),
            bin("B", "PICK", Some(35)),
            bin("C", "PICK", Some(120)),
            bin("D", "PICK", None),
        ]);
        let before = repository.find_by_zone(&warehouse(), "PICK")?;

        let recommendations = service.slotting_recommendations(&warehouse())?;
        assert_eq!(recommendations.len(), 4);
        assert_eq!(
            recommendations[&LocationId::new("B")].recommended_class,
            SlottingClass::A
        );
        assert!(!recommendations[&LocationId::new("D")].is_actionable());

        let golden = service.golden_zone(&warehouse(), "PICK")?;
        assert_eq!(golden.len(), 1);
        assert_eq!(golden[0].id_typed().as_str(), "A");

        let distribution = service.zone_distribution(&warehouse(), "PICK")?;
        assert_eq!(distribution.total, 4);
        assert_eq!(distribution.count(SlottingClass::Mixed), 4);

        assert_eq!(repository.find_by_zone(&warehouse(), "PICK")?, before);
        assert!(subscription.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn pick_path_follows_optimized_classes() -> anyhow::Result<()> {
        let (service, _repository, _subscription) = setup(vec![
            bin("C", "PICK", Some(120)),
            bin("B", "PICK", Some(35)),
            bin("A", "PICK", Some(15)),
        ]);
        service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer")?;

        let route: Vec<_> = service
            .pick_path(&warehouse(), "PICK")?
            .into_iter()
            .map(|r| r.id_typed().to_string())
            .collect();
        assert_eq!(route, vec!["A", "B", "C"]);
        Ok(())
    }

    #[test]
    fn manual_class_update_is_published_with_its_reason() -> anyhow::Result<()> {
        let (service, repository, subscription) = setup(vec![bin("A", "PICK", Some(15))]);

        let saved = service.update_slotting_class(
            &LocationId::new("A"),
            SlottingClass::Hazmat,
            "planner",
            "Stores aerosol cans",
        )?;
        assert_eq!(saved.slotting_class(), SlottingClass::Hazmat);
        assert_eq!(saved.pick_path_sequence(), Some(6000));
        assert_eq!(stored(&repository, "A"), saved);

        let envelope = subscription.recv_timeout(Duration::from_secs(1))?;
        assert_eq!(envelope.payload().reason, "Stores aerosol cans");
        assert_eq!(envelope.payload().updated_by, "planner");
        assert_eq!(envelope.payload().new_class, SlottingClass::Hazmat);
        assert_eq!(envelope.sequence_number(), saved.version());
        Ok(())
    }

    #[test]
    fn updating_unknown_location_is_not_found() {
        let (service, _repository, _subscription) = setup(vec![]);

        match service.update_slotting_class(&LocationId::new("NOPE"), SlottingClass::A, "planner", "test") {
            Err(SlottingServiceError::NotFound(id)) => assert_eq!(id.as_str(), "NOPE"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn balance_reoptimizes_only_overallocated_zones() -> anyhow::Result<()> {
        let mut records: Vec<LocationRecord> = (0..5)
            .map(|i| bin(&format!("P-{i}"), "PICK", Some(150)).with_slotting_class(SlottingClass::FastMover))
            .collect();
        records.push(bin("K-1", "BULK", Some(10)));
        records.push(bin("K-2", "BULK", Some(60)).with_slotting_class(SlottingClass::C));
        let (service, repository, subscription) = setup(records);

        let report = service.balance_slotting(&warehouse(), "balancer")?;

        assert_eq!(report.warehouse_id, warehouse());
        assert_eq!(report.locations_rebalanced, 5);
        assert_eq!(report.zones_needing_rebalancing().collect::<Vec<_>>(), vec!["PICK"]);
        assert!(!report.distribution_by_zone["BULK"].needs_rebalancing);
        assert_eq!(report.distribution_by_zone["PICK"].count(SlottingClass::FastMover), 5);

        assert_eq!(stored(&repository, "P-0").slotting_class(), SlottingClass::C);
        assert_eq!(stored(&repository, "K-1").slotting_class(), SlottingClass::Mixed);
        assert_eq!(subscription.drain().len(), 5);
        Ok(())
    }

    #[test]
    fn finds_nearest_location_with_room() -> anyhow::Result<()> {
        let capacity = Capacity::new(100, 500.0, 2.0)?;
        let (service, _repository, _subscription) = setup(vec![
            bin("NEAR-FULL", "PICK", Some(5))
                .with_slotting_class(SlottingClass::FastMover)
                .with_capacity(capacity.add_inventory(95, 0.0, 0.0)?),
            bin("NEXT", "PICK", Some(12))
                .with_slotting_class(SlottingClass::FastMover)
                .with_capacity(capacity.clone()),
            bin("BLOCKED", "PICK", Some(1))
                .with_slotting_class(SlottingClass::FastMover)
                .with_status(LocationStatus::Blocked)
                .with_capacity(capacity),
        ]);

        let found = service.find_optimal_location(&warehouse(), "PICK", SlottingClass::FastMover, 10)?;
        assert_eq!(found.map(|r| r.id_typed().to_string()), Some("NEXT".to_string()));

        let none = service.find_optimal_location(&warehouse(), "PICK", SlottingClass::B, 1)?;
        assert!(none.is_none());
        Ok(())
    }

    /// Simulates another writer saving the record between our load and our save.
    struct RacingRepository {
        inner: InMemoryLocationRepository,
    }

    impl LocationRepository for RacingRepository {
        fn get(&self, location_id: &LocationId) -> Result<Option<LocationRecord>, RepositoryError> {
            let loaded = self.inner.get(location_id)?;
            if let Some(record) = &loaded {
                self.inner.save(record.clone(), ExpectedVersion::Any)?;
            }
            Ok(loaded)
        }

        fn find_by_zone(&self, warehouse_id: &WarehouseId, zone: &str) -> Result<Vec<LocationRecord>, RepositoryError> {
            let loaded = self.inner.find_by_zone(warehouse_id, zone)?;
            for record in &loaded {
                self.inner.save(record.clone(), ExpectedVersion::Any)?;
            }
            Ok(loaded)
        }

        fn find_active_storage(&self, warehouse_id: &WarehouseId) -> Result<Vec<LocationRecord>, RepositoryError> {
            self.inner.find_active_storage(warehouse_id)
        }

        fn zones(&self, warehouse_id: &WarehouseId) -> Result<Vec<String>, RepositoryError> {
            self.inner.zones(warehouse_id)
        }

        fn save(&self, record: LocationRecord, expected: ExpectedVersion) -> Result<LocationRecord, RepositoryError> {
            self.inner.save(record, expected)
        }
    }

    #[test]
    fn concurrent_modification_is_a_conflict() {
        let inner = InMemoryLocationRepository::new();
        inner.seed([bin("A", "PICK", Some(15))]).unwrap();
        let bus: InMemoryEventBus<Envelope> = InMemoryEventBus::new();
        let subscription = bus.subscribe();
        let service = SlottingService::new(RacingRepository { inner }, bus, SlottingEngine::default());

        match service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer") {
            Err(SlottingServiceError::Repository(RepositoryError::Conflict { expected, actual, .. })) => {
                assert_eq!(expected, ExpectedVersion::Exact(1));
                assert_eq!(actual, 2);
            }
            other => panic!("Expected Conflict, got {other:?}"),
        }
        match service.update_slotting_class(&LocationId::new("A"), SlottingClass::B, "planner", "test") {
            Err(SlottingServiceError::Repository(RepositoryError::Conflict { .. })) => {}
            other => panic!("Expected Conflict, got {other:?}"),
        }
        assert!(subscription.try_recv().is_err());
    }

    struct ClosedBus;

    impl EventBus<Envelope> for ClosedBus {
        type Error = String;

        fn publish(&self, _message: Envelope) -> Result<(), Self::Error> {
            Err("transport closed".to_string())
        }

        fn subscribe(&self) -> Subscription<Envelope> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    #[test]
    fn publish_failure_is_surfaced_after_save() {
        let repository = Arc::new(InMemoryLocationRepository::new());
        repository.seed([bin("A", "PICK", Some(15))]).unwrap();
        let service = SlottingService::new(repository.clone(), ClosedBus, SlottingEngine::default());

        match service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer") {
            Err(SlottingServiceError::Publish(msg)) => assert!(msg.contains("transport closed")),
            other => panic!("Expected Publish error, got {other:?}"),
        }
        let a = stored(&repository, "A");
        assert_eq!(a.slotting_class(), SlottingClass::FastMover);
        assert_eq!(a.version(), 2);
    }

    #[test]
    fn configured_engine_changes_service_behavior() -> anyhow::Result<()> {
        let repository = Arc::new(InMemoryLocationRepository::new());
        repository.seed([bin("A", "PICK", Some(15))])?;
        let engine = SlottingEngine::new(SlottingConfig::default().with_distance_bands(
            slotmaster_slotting::DistanceBands {
                fast_mover_max: 10,
                a_max: 20,
                b_max: 30,
                c_max: 40,
            },
        ))?;
        let bus: InMemoryEventBus<Envelope> = InMemoryEventBus::new();
        let service = SlottingService::new(repository.clone(), bus, engine);

        service.optimize_zone_slotting(&warehouse(), "PICK", "optimizer")?;
        assert_eq!(stored(&repository, "A").slotting_class(), SlottingClass::A);
        Ok(())
    }

    #[test]
    fn zones_can_be_optimized_from_several_threads() {
        let records: Vec<_> = ["PICK", "BULK", "RESERVE"]
            .iter()
            .flat_map(|zone| (0..4).map(move |i| bin(&format!("{zone}-{i}"), zone, Some(10 + 60 * i))))
            .collect();
        let (service, repository, subscription) = setup(records);

        let totals: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = ["PICK", "BULK", "RESERVE"]
                .iter()
                .map(|zone| {
                    let service = &service;
                    s.spawn(move || service.optimize_zone_slotting(&warehouse(), zone, "optimizer").unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(totals, vec![4, 4, 4]);
        assert_eq!(subscription.drain().len(), 12);
        assert_eq!(stored(&repository, "BULK-3").slotting_class(), SlottingClass::C);
    }
}
