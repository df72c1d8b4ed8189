use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distribution::{DEFAULT_REBALANCE_THRESHOLD, DEFAULT_TARGET_FAST_TIER_SHARE};
use crate::golden_zone::DEFAULT_GOLDEN_ZONE_FRACTION;

/// Invalid slotting configuration.
///
/// Raised when a configuration is built or loaded, never while computing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("distance band {lower} ({lower_value}) must be below {upper} ({upper_value})")]
    NonMonotonicBands {
        lower: &'static str,
        lower_value: u32,
        upper: &'static str,
        upper_value: u32,
    },

    #[error("{field} must be within (0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("target fast-tier share {target} exceeds rebalance threshold {threshold}")]
    TargetAboveThreshold { target: f64, threshold: f64 },

    #[error("invalid confidence weight {field}: {reason}")]
    InvalidWeight { field: &'static str, reason: String },
}

/// Upper bounds (inclusive) of the distance bands, in distance units from the dock.
///
/// Anything beyond `c_max` is a slow mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceBands {
    pub fast_mover_max: u32,
    pub a_max: u32,
    pub b_max: u32,
    pub c_max: u32,
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self {
            fast_mover_max: 20,
            a_max: 50,
            b_max: 100,
            c_max: 200,
        }
    }
}

impl DistanceBands {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [
            ("fast_mover_max", self.fast_mover_max),
            ("a_max", self.a_max),
            ("b_max", self.b_max),
            ("c_max", self.c_max),
        ];

        for pair in bounds.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value >= upper_value {
                return Err(ConfigError::NonMonotonicBands {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }
        Ok(())
    }
}

/// Weights of the recommendation confidence score.
///
/// `score = base + max(0, proximity_max - |distance - ideal_band * band_unit_distance|)
///          + capacity_bonus + dimensions_bonus`, clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    pub base: u32,
    pub proximity_max: u32,
    pub band_unit_distance: u32,
    pub capacity_bonus: u32,
    pub dimensions_bonus: u32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 50,
            proximity_max: 30,
            band_unit_distance: 20,
            capacity_bonus: 10,
            dimensions_bonus: 10,
        }
    }
}

impl ConfidenceWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("base", self.base),
            ("proximity_max", self.proximity_max),
            ("capacity_bonus", self.capacity_bonus),
            ("dimensions_bonus", self.dimensions_bonus),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidWeight {
                    field,
                    reason: format!("{value} exceeds the 100 point scale"),
                });
            }
        }

        if self.band_unit_distance == 0 {
            return Err(ConfigError::InvalidWeight {
                field: "band_unit_distance",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Full configuration of the slotting engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlottingConfig {
    pub distance_bands: DistanceBands,
    /// Share of candidates that make up the golden zone.
    pub golden_zone_fraction: f64,
    /// Share of eligible locations the fast tier (FastMover + A) should hold.
    pub target_fast_tier_share: f64,
    /// Fast-tier share above which a zone needs rebalancing.
    pub rebalance_threshold: f64,
    pub confidence: ConfidenceWeights,
}

impl Default for SlottingConfig {
    fn default() -> Self {
        Self {
            distance_bands: DistanceBands::default(),
            golden_zone_fraction: DEFAULT_GOLDEN_ZONE_FRACTION,
            target_fast_tier_share: DEFAULT_TARGET_FAST_TIER_SHARE,
            rebalance_threshold: DEFAULT_REBALANCE_THRESHOLD,
            confidence: ConfidenceWeights::default(),
        }
    }
}

impl SlottingConfig {
    pub fn with_distance_bands(mut self, bands: DistanceBands) -> Self {
        self.distance_bands = bands;
        self
    }

    pub fn with_golden_zone_fraction(mut self, fraction: f64) -> Self {
        self.golden_zone_fraction = fraction;
        self
    }

    pub fn with_target_fast_tier_share(mut self, share: f64) -> Self {
        self.target_fast_tier_share = share;
        self
    }

    pub fn with_rebalance_threshold(mut self, threshold: f64) -> Self {
        self.rebalance_threshold = threshold;
        self
    }

    pub fn with_confidence(mut self, weights: ConfidenceWeights) -> Self {
        self.confidence = weights;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.distance_bands.validate()?;
        validate_fraction("golden_zone_fraction", self.golden_zone_fraction)?;
        validate_share_pair(self.target_fast_tier_share, self.rebalance_threshold)?;
        self.confidence.validate()
    }
}

pub(crate) fn validate_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

pub(crate) fn validate_share_pair(target: f64, threshold: f64) -> Result<(), ConfigError> {
    validate_fraction("target_fast_tier_share", target)?;
    validate_fraction("rebalance_threshold", threshold)?;
    if target > threshold {
        return Err(ConfigError::TargetAboveThreshold { target, threshold });
    }
    Ok(())
}
