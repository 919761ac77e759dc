//! Total Cost Predictor: a coarse total computed straight from features,
//! independent of the per-material pricing table.
//!
//! total = area_sqft × floors × base_rate × city multiplier × quality multiplier
//!
//! The multiplier tables belong to the fitted model, not to the pricing file;
//! the two totals are allowed to diverge and both are surfaced.

use std::collections::BTreeMap;

use bc_core::{CityKey, EstimateError, FeatureSet, Money, QualityKey, QualityTier, NEUTRAL_MULTIPLIER};
use tracing::{debug, warn};

/// Currency per sqft per floor before multipliers.
pub const PREDICTOR_BASE_RATE: f64 = 1500.0;

const CITY_FACTORS: &[(&str, f64)] = &[
    ("Mumbai", 1.8),
    ("Delhi", 1.5),
    ("Bangalore", 1.4),
    ("Chennai", 1.2),
];

/// An already-fitted total-cost model.
pub trait TotalPredictor {
    /// Predicted project total, never negative.
    fn predict_total(&self, features: &FeatureSet) -> Result<Money, EstimateError>;
}

/// Multiplicative model over area and floors.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiplierModel {
    pub base_rate: f64,
    pub city: BTreeMap<String, f64>,
    pub quality: BTreeMap<QualityTier, f64>,
}

impl Default for MultiplierModel {
    fn default() -> Self {
        let city = CITY_FACTORS.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let quality = QualityTier::ALL
            .into_iter()
            .map(|t| {
                let m = match t {
                    QualityTier::Economical => 1.0,
                    QualityTier::Standard => 1.2,
                    QualityTier::Premium => 1.5,
                    QualityTier::HighEnd => 2.0,
                };
                (t, m)
            })
            .collect();
        MultiplierModel {
            base_rate: PREDICTOR_BASE_RATE,
            city,
            quality,
        }
    }
}

impl MultiplierModel {
    pub fn city_multiplier(&self, city: &CityKey) -> f64 {
        match self.city.get(city.as_str()) {
            Some(m) => *m,
            None => {
                warn!(city = %city, "city unknown to predictor; using neutral multiplier");
                NEUTRAL_MULTIPLIER
            }
        }
    }

    pub fn quality_multiplier(&self, quality: &QualityKey) -> f64 {
        match quality.tier().and_then(|t| self.quality.get(&t)) {
            Some(m) => *m,
            None => {
                warn!(quality = %quality, "quality unknown to predictor; using neutral multiplier");
                NEUTRAL_MULTIPLIER
            }
        }
    }
}

impl TotalPredictor for MultiplierModel {
    fn predict_total(&self, features: &FeatureSet) -> Result<Money, EstimateError> {
        features.validate()?;
        let amount = features.area_sqft
            * f64::from(features.floors)
            * self.base_rate
            * self.city_multiplier(&features.city)
            * self.quality_multiplier(&features.quality);
        let total = Money::from_amount(amount).ok_or_else(|| {
            EstimateError::invalid_input(format!("predicted total is not representable: {amount}"))
        })?;
        debug!(total = %total, "total predicted");
        Ok(total)
    }
}

/// `predict_total` with the default model.
pub fn predict_total(features: &FeatureSet) -> Result<Money, EstimateError> {
    MultiplierModel::default().predict_total(features)
}
