use serde::{Deserialize, Serialize};

use slotmaster_core::{DomainError, DomainResult, ValueObject};

const FULL_UTILIZATION_PCT: f64 = 95.0;
const NEAR_CAPACITY_UTILIZATION_PCT: f64 = 80.0;

/// Capacity limits of a location plus what currently occupies it.
///
/// Immutable: `add_inventory` / `remove_inventory` return the new capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    max_quantity: u32,
    max_weight: f64,
    max_volume: f64,
    weight_unit: String, // KG, LB
    volume_unit: String, // M3, FT3

    current_quantity: u32,
    current_weight: f64,
    current_volume: f64,
}

impl ValueObject for Capacity {}

impl Capacity {
    /// Empty capacity with the given limits, in KG / M3.
    pub fn new(max_quantity: u32, max_weight: f64, max_volume: f64) -> DomainResult<Self> {
        if max_quantity == 0 {
            return Err(DomainError::validation("max quantity must be positive"));
        }
        if !(max_weight.is_finite() && max_weight > 0.0) {
            return Err(DomainError::validation("max weight must be positive"));
        }
        if !(max_volume.is_finite() && max_volume > 0.0) {
            return Err(DomainError::validation("max volume must be positive"));
        }

        Ok(Self {
            max_quantity,
            max_weight,
            max_volume,
            weight_unit: "KG".to_string(),
            volume_unit: "M3".to_string(),
            current_quantity: 0,
            current_weight: 0.0,
            current_volume: 0.0,
        })
    }

    pub fn with_units(mut self, weight_unit: impl Into<String>, volume_unit: impl Into<String>) -> Self {
        self.weight_unit = weight_unit.into();
        self.volume_unit = volume_unit.into();
        self
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    pub fn weight_unit(&self) -> &str {
        &self.weight_unit
    }

    pub fn volume_unit(&self) -> &str {
        &self.volume_unit
    }

    pub fn current_quantity(&self) -> u32 {
        self.current_quantity
    }

    pub fn current_weight(&self) -> f64 {
        self.current_weight
    }

    pub fn current_volume(&self) -> f64 {
        self.current_volume
    }

    pub fn available_quantity(&self) -> u32 {
        self.max_quantity.saturating_sub(self.current_quantity)
    }

    pub fn available_weight(&self) -> f64 {
        self.max_weight - self.current_weight
    }

    pub fn available_volume(&self) -> f64 {
        self.max_volume - self.current_volume
    }

    pub fn can_accept(&self, quantity: u32, weight: f64, volume: f64) -> bool {
        let quantity_fits = self
            .current_quantity
            .checked_add(quantity)
            .is_some_and(|total| total <= self.max_quantity);

        quantity_fits
            && self.current_weight + weight <= self.max_weight
            && self.current_volume + volume <= self.max_volume
    }

    pub fn add_inventory(&self, quantity: u32, weight: f64, volume: f64) -> DomainResult<Self> {
        if !self.can_accept(quantity, weight, volume) {
            return Err(DomainError::invariant("location does not have sufficient capacity"));
        }

        let mut next = self.clone();
        next.current_quantity += quantity;
        next.current_weight += weight;
        next.current_volume += volume;
        Ok(next)
    }

    pub fn remove_inventory(&self, quantity: u32, weight: f64, volume: f64) -> DomainResult<Self> {
        if quantity > self.current_quantity {
            return Err(DomainError::invariant("cannot remove more quantity than available"));
        }

        let mut next = self.clone();
        next.current_quantity -= quantity;
        next.current_weight = (next.current_weight - weight).max(0.0);
        next.current_volume = (next.current_volume - volume).max(0.0);
        Ok(next)
    }

    /// Highest of quantity, weight and volume utilization, in percent.
    pub fn utilization_percentage(&self) -> f64 {
        let quantity_pct = f64::from(self.current_quantity) * 100.0 / f64::from(self.max_quantity);
        let weight_pct = self.current_weight * 100.0 / self.max_weight;
        let volume_pct = self.current_volume * 100.0 / self.max_volume;

        quantity_pct.max(weight_pct).max(volume_pct)
    }

    pub fn is_full(&self) -> bool {
        self.utilization_percentage() >= FULL_UTILIZATION_PCT
    }

    pub fn is_near_capacity(&self) -> bool {
        self.utilization_percentage() >= NEAR_CAPACITY_UTILIZATION_PCT
    }
}

impl core::fmt::Display for Capacity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "qty={}/{}, weight={}/{} {}, volume={}/{} {}, util={:.2}%",
            self.current_quantity,
            self.max_quantity,
            self.current_weight,
            self.max_weight,
            self.weight_unit,
            self.current_volume,
            self.max_volume,
            self.volume_unit,
            self.utilization_percentage()
        )
    }
}
