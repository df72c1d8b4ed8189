use std::collections::BTreeMap;

use slotmaster_core::LocationId;
use slotmaster_locations::{LocationRecord, SlottingClass};

use crate::classifier::Classifier;
use crate::config::{ConfigError, SlottingConfig};
use crate::distribution::{DistributionAnalyzer, SlottingDistribution};
use crate::golden_zone::GoldenZoneSelector;
use crate::optimizer::{SlottingChange, ZoneOptimizer};
use crate::pick_path::PickPathSequencer;
use crate::placement;
use crate::recommendation::{Recommendation, RecommendationEngine};

/// All slotting components built from one validated configuration.
///
/// Holds only copied configuration, so one engine can be shared across
/// threads working on different zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlottingEngine {
    config: SlottingConfig,
    classifier: Classifier,
    optimizer: ZoneOptimizer,
    golden_zone: GoldenZoneSelector,
    recommendations: RecommendationEngine,
    distribution: DistributionAnalyzer,
    pick_path: PickPathSequencer,
}

impl SlottingEngine {
    pub fn new(config: SlottingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let classifier = Classifier::new(config.distance_bands)?;
        Ok(Self {
            config,
            classifier,
            optimizer: ZoneOptimizer::new(classifier),
            golden_zone: GoldenZoneSelector::new(config.golden_zone_fraction)?,
            recommendations: RecommendationEngine::new(classifier, config.confidence)?,
            distribution: DistributionAnalyzer::new(
                config.target_fast_tier_share,
                config.rebalance_threshold,
            )?,
            pick_path: PickPathSequencer,
        })
    }

    pub fn config(&self) -> &SlottingConfig {
        &self.config
    }

    pub fn classify(&self, distance: u32) -> SlottingClass {
        self.classifier.classify(distance)
    }

    pub fn optimize_zone(&self, locations: &mut [LocationRecord]) -> usize {
        self.optimizer.optimize_zone(locations)
    }

    pub fn optimize_zone_with_changes(&self, locations: &mut [LocationRecord]) -> Vec<SlottingChange> {
        self.optimizer.optimize_zone_with_changes(locations)
    }

    pub fn golden_zone<'a>(&self, locations: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        self.golden_zone.select(locations)
    }

    pub fn recommend(&self, locations: &[LocationRecord]) -> BTreeMap<LocationId, Recommendation> {
        self.recommendations.recommend(locations)
    }

    pub fn analyze(&self, locations: &[LocationRecord]) -> SlottingDistribution {
        self.distribution.analyze(locations)
    }

    pub fn pick_path<'a>(&self, locations: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        self.pick_path.order(locations)
    }

    pub fn find_optimal_location<'a>(
        &self,
        locations: &'a [LocationRecord],
        target: SlottingClass,
        required_quantity: u32,
    ) -> Option<&'a LocationRecord> {
        placement::find_optimal_location(locations, target, required_quantity)
    }
}

impl Default for SlottingEngine {
    fn default() -> Self {
        let classifier = Classifier::default();
        Self {
            config: SlottingConfig::default(),
            classifier,
            optimizer: ZoneOptimizer::new(classifier),
            golden_zone: GoldenZoneSelector::default(),
            recommendations: RecommendationEngine::default(),
            distribution: DistributionAnalyzer::default(),
            pick_path: PickPathSequencer,
        }
    }
}
