use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use slotmaster_core::LocationId;
use slotmaster_locations::{LocationRecord, LocationStatus, SlottingClass};

use crate::classifier::Classifier;
use crate::config::{ConfidenceWeights, ConfigError};

/// Reasoning carried by a recommendation for a location without a surveyed distance.
pub const DISTANCE_NOT_SET: &str = "distance not set";

/// Advisory slotting class for one location.
///
/// This is a report payload; building it never changes the location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub location_id: LocationId,
    pub current_class: SlottingClass,
    pub recommended_class: SlottingClass,
    /// 0..=100
    pub confidence_score: u8,
    pub reasoning: String,
    pub distance_from_dock: Option<u32>,
}

impl Recommendation {
    /// False for the placeholder produced when the distance is unknown.
    pub fn is_actionable(&self) -> bool {
        self.distance_from_dock.is_some()
    }

    pub fn suggests_change(&self) -> bool {
        self.is_actionable() && self.recommended_class != self.current_class
    }
}

/// Scores how well each active storage location fits the class its distance calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecommendationEngine {
    classifier: Classifier,
    weights: ConfidenceWeights,
}

impl RecommendationEngine {
    pub fn new(classifier: Classifier, weights: ConfidenceWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { classifier, weights })
    }

    pub fn weights(&self) -> ConfidenceWeights {
        self.weights
    }

    /// One recommendation per active storage location, keyed by location id.
    pub fn recommend(&self, locations: &[LocationRecord]) -> BTreeMap<LocationId, Recommendation> {
        locations
            .iter()
            .filter(|location| location.status() == LocationStatus::Active && location.is_storage())
            .map(|location| (location.id_typed().clone(), self.recommend_one(location)))
            .collect()
    }

    pub fn recommend_one(&self, location: &LocationRecord) -> Recommendation {
        let current = location.slotting_class();

        let Some(distance) = location.distance_from_dock() else {
            return Recommendation {
                location_id: location.id_typed().clone(),
                current_class: current,
                recommended_class: current,
                confidence_score: 0,
                reasoning: DISTANCE_NOT_SET.to_string(),
                distance_from_dock: None,
            };
        };

        let recommended = self.classifier.classify(distance);
        Recommendation {
            location_id: location.id_typed().clone(),
            current_class: current,
            recommended_class: recommended,
            confidence_score: self.confidence_score(location, distance, recommended),
            reasoning: format!(
                "Location is {distance} units from dock. Recommended {recommended} (current: {current})"
            ),
            distance_from_dock: Some(distance),
        }
    }

    fn confidence_score(&self, location: &LocationRecord, distance: u32, recommended: SlottingClass) -> u8 {
        let weights = &self.weights;

        let ideal = i64::from(recommended.ideal_distance_band()) * i64::from(weights.band_unit_distance);
        let gap = (i64::from(distance) - ideal).abs();
        let proximity = (i64::from(weights.proximity_max) - gap).max(0);

        let mut score = i64::from(weights.base) + proximity;
        if location.capacity().is_some() {
            score += i64::from(weights.capacity_bonus);
        }
        if location.dimensions().is_some() {
            score += i64::from(weights.dimensions_bonus);
        }

        u8::try_from(score.clamp(0, 100)).unwrap_or(100)
    }
}
