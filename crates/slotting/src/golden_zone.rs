use tracing::trace;

use slotmaster_locations::LocationRecord;

use crate::config::{ConfigError, validate_fraction};

pub const DEFAULT_GOLDEN_ZONE_FRACTION: f64 = 0.20;

// Absorbs float noise so that e.g. 10 * 0.2 stays 2 instead of rounding up to 3.
const SIZE_EPSILON: f64 = 1e-9;

/// Picks the nearest-to-dock slice of a zone's slotting candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenZoneSelector {
    fraction: f64,
}

impl Default for GoldenZoneSelector {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_GOLDEN_ZONE_FRACTION,
        }
    }
}

impl GoldenZoneSelector {
    pub fn new(fraction: f64) -> Result<Self, ConfigError> {
        validate_fraction("golden_zone_fraction", fraction)?;
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Golden-zone size for `candidates` eligible locations: at least one,
    /// never more than there are.
    pub fn size_for(&self, candidates: usize) -> usize {
        if candidates == 0 {
            return 0;
        }
        let raw = candidates as f64 * self.fraction;
        let size = (raw - SIZE_EPSILON).ceil().max(1.0) as usize;
        size.min(candidates)
    }

    /// Active storage locations with a known distance, nearest first
    /// (ties broken by pick-path sequence, unsequenced last), cut to
    /// [`size_for`](Self::size_for).
    pub fn select<'a>(&self, locations: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        let mut candidates: Vec<&LocationRecord> = locations
            .iter()
            .filter(|location| location.is_slotting_candidate())
            .collect();

        candidates.sort_by_key(|location| {
            (
                location.distance_from_dock(),
                location.pick_path_sequence().is_none(),
                location.pick_path_sequence(),
            )
        });

        let size = self.size_for(candidates.len());
        trace!(candidates = candidates.len(), size, "golden zone selected");
        candidates.truncate(size);
        candidates
    }
}
