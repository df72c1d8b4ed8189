use slotmaster_locations::SlottingClass;

use crate::config::{ConfigError, DistanceBands};

/// Maps a distance from the dock to the velocity class that belongs there.
///
/// Nearer locations get faster classes; band bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    bands: DistanceBands,
}

impl Classifier {
    pub fn new(bands: DistanceBands) -> Result<Self, ConfigError> {
        bands.validate()?;
        Ok(Self { bands })
    }

    pub fn bands(&self) -> DistanceBands {
        self.bands
    }

    pub fn classify(&self, distance: u32) -> SlottingClass {
        let bands = &self.bands;
        if distance <= bands.fast_mover_max {
            SlottingClass::FastMover
        } else if distance <= bands.a_max {
            SlottingClass::A
        } else if distance <= bands.b_max {
            SlottingClass::B
        } else if distance <= bands.c_max {
            SlottingClass::C
        } else {
            SlottingClass::SlowMover
        }
    }
}
