//! Quantity Estimator: area × fixed per-sqft factor, per material.
//!
//! Contract:
//! - Each quantity is `round(area_sqft × factor)` (halves away from zero),
//!   floored at zero.
//! - Floors, city and quality do not enter this step; they act on pricing only.
//! - Non-finite or negative area → `InvalidInput`.

use bc_core::{EstimateError, FeatureSet, Material, QuantityVector};
use tracing::debug;

/// Per-sqft material factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerSqftFactors {
    pub bricks: f64,
    pub cement_bags: f64,
    pub steel_kg: f64,
    pub paint_liters: f64,
    pub worker_days: f64,
}

impl Default for PerSqftFactors {
    fn default() -> Self {
        PerSqftFactors {
            bricks: 8.0,
            cement_bags: 0.4,
            steel_kg: 4.0,
            paint_liters: 0.18,
            worker_days: 0.12,
        }
    }
}

impl PerSqftFactors {
    pub fn factor(&self, m: Material) -> f64 {
        match m {
            Material::Bricks => self.bricks,
            Material::Cement => self.cement_bags,
            Material::Steel => self.steel_kg,
            Material::Paint => self.paint_liters,
            Material::Labor => self.worker_days,
        }
    }

    /// Every factor finite and >= 0.
    pub fn validate(&self) -> Result<(), EstimateError> {
        for m in Material::ALL {
            let f = self.factor(m);
            if !f.is_finite() || f < 0.0 {
                return Err(EstimateError::invalid_configuration(format!(
                    "per-sqft factor for {} must be a non-negative number, got {f}",
                    m.quantity_key()
                )));
            }
        }
        Ok(())
    }

    /// Quantities for a bare area. Zero area is accepted and yields zeros.
    pub fn quantities_for_area(&self, area_sqft: f64) -> Result<QuantityVector, EstimateError> {
        if !area_sqft.is_finite() || area_sqft < 0.0 {
            return Err(EstimateError::invalid_input(format!(
                "area_sqft must be a non-negative number, got {area_sqft}"
            )));
        }

        let mut out = Vec::with_capacity(Material::ALL.len());
        for m in Material::ALL {
            let q = round_quantity(area_sqft * self.factor(m)).ok_or_else(|| {
                EstimateError::invalid_input(format!(
                    "{} for area {area_sqft} does not fit a quantity",
                    m.quantity_key()
                ))
            })?;
            out.push((m, q));
        }
        let qty = QuantityVector::from_pairs(out);
        debug!(area_sqft, ?qty, "quantities estimated");
        Ok(qty)
    }

    pub fn estimate(&self, features: &FeatureSet) -> Result<QuantityVector, EstimateError> {
        self.quantities_for_area(features.area_sqft)
    }
}

/// `estimate_quantities` with the default factor table.
pub fn estimate_quantities(features: &FeatureSet) -> Result<QuantityVector, EstimateError> {
    PerSqftFactors::default().estimate(features)
}

/// Nearest integer, floored at zero. `None` when not representable.
fn round_quantity(x: f64) -> Option<u64> {
    if !x.is_finite() {
        return None;
    }
    let r = x.round().max(0.0);
    if r >= u64::MAX as f64 {
        return None;
    }
    Some(r as u64)
}
