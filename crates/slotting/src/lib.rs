//! `slotmaster-slotting`: velocity-based slotting engine.
//!
//! **Responsibility:** decide which velocity class every storage location
//! should hold, and report on the result.
//!
//! - [`Classifier`] maps a distance from dock to a class using configured bands.
//! - [`ZoneOptimizer`] is the only component that mutates records.
//! - [`GoldenZoneSelector`], [`RecommendationEngine`], [`DistributionAnalyzer`]
//!   and [`PickPathSequencer`] are read-only reports over the same records.
//!
//! Nothing here performs IO. Records missing the data a computation needs
//! (no surveyed distance, decommissioned, non-storage kind) are left out of
//! that computation instead of failing it.

pub mod classifier;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod golden_zone;
pub mod optimizer;
pub mod pick_path;
pub mod placement;
pub mod recommendation;

pub use classifier::Classifier;
pub use config::{ConfidenceWeights, ConfigError, DistanceBands, SlottingConfig};
pub use distribution::{DistributionAnalyzer, SlottingDistribution};
pub use engine::SlottingEngine;
pub use golden_zone::GoldenZoneSelector;
pub use optimizer::{SlottingChange, ZoneOptimizer};
pub use pick_path::{PickPathSequencer, compare_for_pick_path};
pub use placement::find_optimal_location;
pub use recommendation::{DISTANCE_NOT_SET, Recommendation, RecommendationEngine};

#[cfg(test)]
mod fixtures;
