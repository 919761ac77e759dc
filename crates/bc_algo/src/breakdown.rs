//! Cost Breakdown Computer.
//!
//! Contract:
//! - combined = city_multiplier(city) × quality_multiplier(quality), each
//!   defaulting to 1.0 for keys the table does not carry
//! - unit rate = base rate × combined
//! - line = quantity / units_per_rate × unit rate, rounded to cents once
//! - total = integer sum of the rounded lines
//! - a missing or non-positive base rate, or a non-positive combined
//!   multiplier, is a `Configuration` error, never a zero line
//!
//! Keys arrive canonicalized (`CityKey`/`QualityKey` construction runs the
//! canonicalization table), so synonyms such as `basic` already read
//! `economical` here.

use std::collections::BTreeMap;

use bc_core::{
    CityKey, CostBreakdown, EstimateError, Material, Money, PricingTable, QualityKey, QuantityVector,
};
use tracing::{debug, warn};

pub fn compute_breakdown(
    qty: &QuantityVector,
    city: &CityKey,
    quality: &QualityKey,
    pricing: &PricingTable,
) -> Result<CostBreakdown, EstimateError> {
    if pricing.find_city_multiplier(city).is_none() {
        warn!(city = %city, "city not in pricing table; using neutral multiplier");
    }
    if pricing.find_quality_multiplier(quality).is_none() {
        warn!(quality = %quality, "quality not in pricing table; using neutral multiplier");
    }
    let combined = pricing.combined_multiplier(city, quality);
    if !(combined.is_finite() && combined > 0.0) {
        return Err(EstimateError::configuration(format!(
            "multiplier for {city}/{quality} must be a positive number, got {combined}"
        )));
    }

    let mut lines = BTreeMap::new();
    let mut rates = BTreeMap::new();
    for m in Material::ALL {
        let unit_rate = pricing.base_rate(m)? * combined;
        let amount = (qty.get(m) as f64 / m.units_per_rate()) * unit_rate;
        let line = Money::from_amount(amount).ok_or_else(|| {
            EstimateError::invalid_input(format!("{} cost is not representable: {amount}", m.cost_key()))
        })?;
        lines.insert(m, line);
        rates.insert(m, unit_rate);
    }

    let breakdown = CostBreakdown::from_lines(lines, rates)
        .ok_or_else(|| EstimateError::invalid_input("breakdown total overflows"))?;
    debug!(combined, total = %breakdown.total(), "breakdown computed");
    Ok(breakdown)
}
