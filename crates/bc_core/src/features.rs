//! The resolved, validated input of one estimation request.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::EstimateError;
use crate::keys::{CityKey, QualityKey};

/// Features after override resolution.
///
/// `rooms_estimate` and `wall_length_ft` are advisory: they are echoed in
/// records but never enter pricing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FeatureSet {
    pub area_sqft: f64,
    pub floors: u32,
    pub city: CityKey,
    pub quality: QualityKey,
    pub rooms_estimate: u32,
    pub wall_length_ft: f64,
}

impl FeatureSet {
    /// Validated constructor; advisory fields start at zero.
    pub fn new(
        area_sqft: f64,
        floors: u32,
        city: CityKey,
        quality: QualityKey,
    ) -> Result<Self, EstimateError> {
        let fs = FeatureSet {
            area_sqft,
            floors,
            city,
            quality,
            rooms_estimate: 0,
            wall_length_ft: 0.0,
        };
        fs.validate()?;
        Ok(fs)
    }

    /// Attach the advisory fields.
    pub fn with_advisory(mut self, rooms_estimate: u32, wall_length_ft: f64) -> Result<Self, EstimateError> {
        self.rooms_estimate = rooms_estimate;
        self.wall_length_ft = wall_length_ft;
        self.validate()?;
        Ok(self)
    }

    /// `area_sqft` finite and > 0, `floors` > 0, `wall_length_ft` finite and >= 0.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !self.area_sqft.is_finite() || self.area_sqft <= 0.0 {
            return Err(EstimateError::invalid_input(format!(
                "area_sqft must be a positive number, got {}",
                self.area_sqft
            )));
        }
        if self.floors == 0 {
            return Err(EstimateError::invalid_input("floors must be >= 1"));
        }
        if !self.wall_length_ft.is_finite() || self.wall_length_ft < 0.0 {
            return Err(EstimateError::invalid_input(format!(
                "wall_length_ft must be a non-negative number, got {}",
                self.wall_length_ft
            )));
        }
        Ok(())
    }
}
