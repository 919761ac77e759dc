//! Pricing table: base unit rates plus city and quality multiplier tables.
//!
//! Pure data with a lookup contract:
//! - base rates are required; a missing one is a `Configuration` error,
//!   never a silent zero
//! - multipliers default to `NEUTRAL_MULTIPLIER` for unrecognized keys

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;
use crate::keys::{CityKey, QualityKey};
use crate::materials::Material;

/// Multiplier applied when a city or quality key is not in the table.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Base rates plus multiplier tables.
///
/// Fields are private: `new` and `checked` are the only ways to obtain a
/// table that has had its keys canonicalized and its values checked.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PricingTable {
    /// Rate key (`brick_per_1000`, `cement_bag`, ...) → currency per unit.
    base: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    city_multiplier: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    quality_multiplier: BTreeMap<String, f64>,
}

impl PricingTable {
    /// Canonicalize the multiplier keys, then validate every rate and multiplier.
    pub fn new(
        base: BTreeMap<String, f64>,
        city_multiplier: BTreeMap<String, f64>,
        quality_multiplier: BTreeMap<String, f64>,
    ) -> Result<Self, EstimateError> {
        PricingTable {
            base,
            city_multiplier,
            quality_multiplier,
        }
        .checked()
    }

    /// Same check as `new`, for a table that was deserialized.
    pub fn checked(self) -> Result<Self, EstimateError> {
        let table = self.canonicalized();
        table.validate()?;
        Ok(table)
    }

    pub fn city_multipliers(&self) -> &BTreeMap<String, f64> {
        &self.city_multiplier
    }

    pub fn quality_multipliers(&self) -> &BTreeMap<String, f64> {
        &self.quality_multiplier
    }

    /// Base rate for `m`. Missing, non-finite or non-positive rates are
    /// `Configuration` errors, never a zero-cost line.
    pub fn base_rate(&self, m: Material) -> Result<f64, EstimateError> {
        let r = self.base.get(m.rate_key()).copied().ok_or_else(|| {
            EstimateError::configuration(format!("missing base rate: {}", m.rate_key()))
        })?;
        check_positive("base", m.rate_key(), r)?;
        Ok(r)
    }

    /// Exact canonical key first, then any raw key that canonicalizes to it.
    pub fn find_city_multiplier(&self, city: &CityKey) -> Option<f64> {
        lookup(&self.city_multiplier, city.as_str(), CityKey::canonicalize)
    }

    pub fn find_quality_multiplier(&self, quality: &QualityKey) -> Option<f64> {
        lookup(&self.quality_multiplier, quality.as_str(), QualityKey::canonicalize)
    }

    pub fn city_multiplier(&self, city: &CityKey) -> f64 {
        self.find_city_multiplier(city).unwrap_or(NEUTRAL_MULTIPLIER)
    }

    pub fn quality_multiplier(&self, quality: &QualityKey) -> f64 {
        self.find_quality_multiplier(quality).unwrap_or(NEUTRAL_MULTIPLIER)
    }

    /// city multiplier × quality multiplier, each defaulting to 1.0.
    pub fn combined_multiplier(&self, city: &CityKey, quality: &QualityKey) -> f64 {
        self.city_multiplier(city) * self.quality_multiplier(quality)
    }

    /// Re-key both multiplier tables through the canonicalization tables so a
    /// file keyed `basic` prices the `economical` tier. When two raw keys
    /// collapse onto one canonical key, the canonical spelling wins.
    fn canonicalized(self) -> Self {
        fn rekey(
            raw: BTreeMap<String, f64>,
            canon: impl Fn(&str) -> String,
        ) -> BTreeMap<String, f64> {
            let mut out = BTreeMap::new();
            let mut exact = Vec::new();
            for (k, v) in raw {
                let c = canon(k.as_str());
                if c == k {
                    exact.push((c, v));
                } else {
                    out.entry(c).or_insert(v);
                }
            }
            out.extend(exact);
            out
        }

        PricingTable {
            base: self.base,
            city_multiplier: rekey(self.city_multiplier, CityKey::canonicalize),
            quality_multiplier: rekey(self.quality_multiplier, QualityKey::canonicalize),
        }
    }

    /// All five base rates present; every rate and multiplier finite and > 0.
    pub fn validate(&self) -> Result<(), EstimateError> {
        for m in Material::ALL {
            self.base_rate(m)?;
        }
        for (k, v) in &self.city_multiplier {
            check_positive("city_multiplier", k, *v)?;
        }
        for (k, v) in &self.quality_multiplier {
            check_positive("quality_multiplier", k, *v)?;
        }
        Ok(())
    }
}

fn lookup(
    table: &BTreeMap<String, f64>,
    canonical: &str,
    canon: impl Fn(&str) -> String,
) -> Option<f64> {
    table.get(canonical).copied().or_else(|| {
        table
            .iter()
            .find(|(k, _)| canon(k.as_str()) == canonical)
            .map(|(_, v)| *v)
    })
}

fn check_positive(table: &str, key: &str, v: f64) -> Result<(), EstimateError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(EstimateError::configuration(format!(
            "{table}.{key} must be a positive number, got {v}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn base() -> BTreeMap<String, f64> {
        map(&[
            ("brick_per_1000", 6500.0),
            ("cement_bag", 380.0),
            ("steel_kg", 78.0),
            ("paint_liter", 260.0),
            ("labor_day", 1000.0),
        ])
    }

    fn table() -> PricingTable {
        PricingTable::new(
            base(),
            map(&[("Chennai", 1.2)]),
            map(&[("standard", 1.2), ("basic", 0.9)]),
        )
        .unwrap()
    }

    #[test]
    fn unknown_keys_are_neutral() {
        let t = table();
        let city: CityKey = "Atlantis".parse().unwrap();
        let q: QualityKey = "bespoke".parse().unwrap();
        assert_eq!(t.city_multiplier(&city), NEUTRAL_MULTIPLIER);
        assert_eq!(t.quality_multiplier(&q), NEUTRAL_MULTIPLIER);
    }

    #[test]
    fn missing_base_rate_is_configuration_error() {
        let mut b = base();
        b.remove("steel_kg");
        let err = PricingTable::new(b, BTreeMap::new(), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, EstimateError::Configuration(ref m) if m.contains("steel_kg")));
    }

    #[test]
    fn non_positive_values_are_rejected_at_construction() {
        let err = PricingTable::new(base(), map(&[("Delhi", 0.0)]), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, EstimateError::Configuration(ref m) if m.contains("city_multiplier.Delhi")));

        let mut b = base();
        b.insert("paint_liter".into(), -260.0);
        let err = PricingTable::new(b, BTreeMap::new(), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, EstimateError::Configuration(ref m) if m.contains("paint_liter")));

        let mut b = base();
        b.insert("paint_liter".into(), f64::NAN);
        assert!(PricingTable::new(b, BTreeMap::new(), BTreeMap::new()).is_err());
    }

    #[test]
    fn constructor_rekeys_quality_synonyms() {
        let t = table();
        let econ: QualityKey = "economical".parse().unwrap();
        assert_eq!(t.quality_multiplier(&econ), 0.9);
        assert!(!t.quality_multipliers().contains_key("basic"));
        let basic: QualityKey = "basic".parse().unwrap();
        assert_eq!(t.quality_multiplier(&basic), 0.9);
    }

    #[test]
    fn canonical_spelling_wins_on_collision() {
        let t = PricingTable::new(
            base(),
            BTreeMap::new(),
            map(&[("basic", 0.9), ("economical", 1.0)]),
        )
        .unwrap();
        assert_eq!(t.quality_multipliers().get("economical"), Some(&1.0));
    }

    #[test]
    fn city_aliases_are_rekeyed() {
        let t = PricingTable::new(base(), map(&[("Bombay", 1.8)]), BTreeMap::new()).unwrap();
        let mumbai: CityKey = "Mumbai".parse().unwrap();
        assert_eq!(t.find_city_multiplier(&mumbai), Some(1.8));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_table_still_guards_lookups() {
        let t: PricingTable = serde_json::from_str(
            r#"{"base":{"brick_per_1000":6500,"cement_bag":380,"steel_kg":78,"paint_liter":-260,"labor_day":1000},
                "quality_multiplier":{"basic":0.5}}"#,
        )
        .unwrap();
        let econ: QualityKey = "economical".parse().unwrap();
        assert_eq!(t.find_quality_multiplier(&econ), Some(0.5));
        assert!(matches!(t.base_rate(Material::Paint), Err(EstimateError::Configuration(_))));
        assert!(t.checked().is_err());
    }
}
