use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use slotmaster_locations::{LocationRecord, SlottingClass};

use crate::config::{ConfigError, validate_share_pair};

pub const DEFAULT_TARGET_FAST_TIER_SHARE: f64 = 0.20;
pub const DEFAULT_REBALANCE_THRESHOLD: f64 = 0.30;

/// Class counts of one zone (or any set of locations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlottingDistribution {
    pub counts_by_class: BTreeMap<SlottingClass, u64>,
    pub total: u64,
    pub needs_rebalancing: bool,
    pub target_fast_tier_share: f64,
}

impl SlottingDistribution {
    pub fn count(&self, class: SlottingClass) -> u64 {
        self.counts_by_class.get(&class).copied().unwrap_or(0)
    }

    pub fn fast_tier_count(&self) -> u64 {
        self.counts_by_class
            .iter()
            .filter(|(class, _)| class.is_fast_tier())
            .map(|(_, count)| count)
            .sum()
    }

    /// Share of eligible locations in FastMover or A; 0 when there are none.
    pub fn fast_tier_share(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.fast_tier_count() as f64 / self.total as f64
    }

    /// Signed distance of the fast-tier share from the target share.
    pub fn drift_from_target(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.fast_tier_share() - self.target_fast_tier_share
    }
}

/// Counts classes over storage locations that are not decommissioned and
/// flags sets whose fast tier is over-allocated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionAnalyzer {
    target_fast_tier_share: f64,
    rebalance_threshold: f64,
}

impl Default for DistributionAnalyzer {
    fn default() -> Self {
        Self {
            target_fast_tier_share: DEFAULT_TARGET_FAST_TIER_SHARE,
            rebalance_threshold: DEFAULT_REBALANCE_THRESHOLD,
        }
    }
}

impl DistributionAnalyzer {
    pub fn new(target_fast_tier_share: f64, rebalance_threshold: f64) -> Result<Self, ConfigError> {
        validate_share_pair(target_fast_tier_share, rebalance_threshold)?;
        Ok(Self {
            target_fast_tier_share,
            rebalance_threshold,
        })
    }

    pub fn rebalance_threshold(&self) -> f64 {
        self.rebalance_threshold
    }

    pub fn target_fast_tier_share(&self) -> f64 {
        self.target_fast_tier_share
    }

    pub fn analyze(&self, locations: &[LocationRecord]) -> SlottingDistribution {
        let mut counts_by_class: BTreeMap<SlottingClass, u64> = BTreeMap::new();

        for location in locations
            .iter()
            .filter(|location| location.is_storage() && !location.is_decommissioned())
        {
            *counts_by_class.entry(location.slotting_class()).or_insert(0) += 1;
        }

        let total = counts_by_class.values().sum();
        let mut distribution = SlottingDistribution {
            counts_by_class,
            total,
            needs_rebalancing: false,
            target_fast_tier_share: self.target_fast_tier_share,
        };
        distribution.needs_rebalancing =
            distribution.total > 0 && distribution.fast_tier_share() > self.rebalance_threshold;

        trace!(
            total = distribution.total,
            fast_tier_share = distribution.fast_tier_share(),
            needs_rebalancing = distribution.needs_rebalancing,
            "slotting distribution analyzed"
        );
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{aisle, bin};
    use slotmaster_locations::LocationStatus;

    fn classed(n: usize, prefix: &str, class: SlottingClass) -> Vec<LocationRecord> {
        (0..n)
            .map(|i| bin(&format!("{prefix}-{i}")).with_slotting_class(class))
            .collect()
    }

    fn zone(fast: usize, a: usize, c: usize) -> Vec<LocationRecord> {
        let mut zone = classed(fast, "F", SlottingClass::FastMover);
        zone.extend(classed(a, "A", SlottingClass::A));
        zone.extend(classed(c, "C", SlottingClass::C));
        zone
    }

    #[test]
    fn empty_input_needs_no_rebalancing() {
        let distribution = DistributionAnalyzer::default().analyze(&[]);
        assert_eq!(distribution.total, 0);
        assert!(distribution.counts_by_class.is_empty());
        assert!(!distribution.needs_rebalancing);
        assert_eq!(distribution.fast_tier_share(), 0.0);
        assert_eq!(distribution.drift_from_target(), 0.0);
    }

    #[test]
    fn fast_tier_above_threshold_needs_rebalancing() {
        let distribution = DistributionAnalyzer::default().analyze(&zone(2, 2, 6));
        assert_eq!(distribution.total, 10);
        assert_eq!(distribution.fast_tier_count(), 4);
        assert!(distribution.needs_rebalancing);
        assert!((distribution.drift_from_target() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn share_exactly_at_threshold_is_fine() {
        let distribution = DistributionAnalyzer::default().analyze(&zone(1, 2, 7));
        assert!((distribution.fast_tier_share() - 0.3).abs() < 1e-9);
        assert!(!distribution.needs_rebalancing);
    }

    #[test]
    fn counts_storage_that_is_not_decommissioned() {
        let mut locations = zone(1, 0, 1);
        locations.push(bin("BLOCKED").with_slotting_class(SlottingClass::B).with_status(LocationStatus::Blocked));
        locations.push(
            bin("GONE")
                .with_slotting_class(SlottingClass::FastMover)
                .with_status(LocationStatus::Decommissioned),
        );
        locations.push(aisle("AISLE", 5));

        let distribution = DistributionAnalyzer::default().analyze(&locations);
        assert_eq!(distribution.total, 3);
        assert_eq!(distribution.count(SlottingClass::FastMover), 1);
        assert_eq!(distribution.count(SlottingClass::B), 1);
        assert_eq!(distribution.count(SlottingClass::Mixed), 0);
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = DistributionAnalyzer::new(0.1, 0.15).unwrap();
        assert!(strict.analyze(&zone(1, 1, 8)).needs_rebalancing);
        assert!(DistributionAnalyzer::new(0.5, 0.3).is_err());
    }

    #[test]
    fn serializes_counts_by_class_name() {
        let distribution = DistributionAnalyzer::default().analyze(&zone(1, 0, 2));
        let json = serde_json::to_value(&distribution).unwrap();
        assert_eq!(json["counts_by_class"]["FAST_MOVER"], 1);
        assert_eq!(json["counts_by_class"]["C"], 2);
        assert_eq!(json["total"], 3);
    }
}
