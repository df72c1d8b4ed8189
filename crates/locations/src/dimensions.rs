use serde::{Deserialize, Serialize};

use slotmaster_core::{DomainError, DomainResult, ValueObject};

/// Physical dimensions of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    length: f64,
    width: f64,
    height: f64,
    unit: String, // CM, INCH, ...
}

impl ValueObject for Dimensions {}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64, unit: impl Into<String>) -> DomainResult<Self> {
        ensure_positive("length", length)?;
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;

        let unit = unit.into();
        if unit.trim().is_empty() {
            return Err(DomainError::validation("unit is required"));
        }

        Ok(Self {
            length,
            width,
            height,
            unit,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    pub fn floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// Whether an item of `item` dimensions fits (no rotation).
    pub fn can_fit(&self, item: &Dimensions) -> DomainResult<bool> {
        if self.unit != item.unit {
            return Err(DomainError::validation(format!(
                "cannot compare dimensions in {} with dimensions in {}",
                self.unit, item.unit
            )));
        }
        Ok(self.length >= item.length && self.width >= item.width && self.height >= item.height)
    }
}

impl core::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} x {} x {} {}", self.length, self.width, self.height, self.unit)
    }
}

fn ensure_positive(field: &str, value: f64) -> DomainResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{field} must be positive")))
    }
}
