//! Material categories and the per-request value types built over them:
//! `QuantityVector`, `CostBreakdown`, `Projection`.

use std::collections::BTreeMap;

use crate::money::Money;

/// The five priced material categories. Declaration order is the canonical
/// emission order everywhere (bricks, cement, steel, paint, labor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Material {
    Bricks,
    Cement,
    Steel,
    Paint,
    Labor,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Bricks,
        Material::Cement,
        Material::Steel,
        Material::Paint,
        Material::Labor,
    ];

    /// Key in a `QuantityVector`.
    pub fn quantity_key(self) -> &'static str {
        match self {
            Material::Bricks => "bricks_count",
            Material::Cement => "cement_bags",
            Material::Steel => "steel_kg",
            Material::Paint => "paint_liters",
            Material::Labor => "worker_days",
        }
    }

    /// Key in the pricing table's `base` object.
    pub fn rate_key(self) -> &'static str {
        match self {
            Material::Bricks => "brick_per_1000",
            Material::Cement => "cement_bag",
            Material::Steel => "steel_kg",
            Material::Paint => "paint_liter",
            Material::Labor => "labor_day",
        }
    }

    /// Key in a `CostBreakdown`.
    pub fn cost_key(self) -> &'static str {
        match self {
            Material::Bricks => "bricks",
            Material::Cement => "cement",
            Material::Steel => "steel",
            Material::Paint => "paint",
            Material::Labor => "labor",
        }
    }

    /// How many counted units one base rate covers. Bricks are priced per 1000.
    pub fn units_per_rate(self) -> f64 {
        match self {
            Material::Bricks => 1000.0,
            _ => 1.0,
        }
    }
}

/* ------------------------------- Quantities ------------------------------- */

/// Predicted quantity per material. Values are whole units, never negative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantityVector {
    counts: BTreeMap<Material, u64>,
}

impl QuantityVector {
    /// Build from a per-material function; every material gets an entry.
    pub fn from_fn(mut f: impl FnMut(Material) -> u64) -> Self {
        let counts = Material::ALL.into_iter().map(|m| (m, f(m))).collect();
        Self { counts }
    }

    /// Build from pairs. Materials not mentioned get zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Material, u64)>) -> Self {
        let given: BTreeMap<Material, u64> = pairs.into_iter().collect();
        Self::from_fn(|m| given.get(&m).copied().unwrap_or(0))
    }

    pub fn get(&self, m: Material) -> u64 {
        self.counts.get(&m).copied().unwrap_or(0)
    }

    /// Entries in canonical material order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, u64)> + '_ {
        self.counts.iter().map(|(m, q)| (*m, *q))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QuantityVector {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = s.serialize_map(Some(self.counts.len()))?;
        for (m, q) in self.iter() {
            map.serialize_entry(m.quantity_key(), &q)?;
        }
        map.end()
    }
}

/* -------------------------------- Breakdown -------------------------------- */

/// Per-material cost lines, the effective unit rates used to price them, and
/// their total. The total is the integer sum of the already-rounded lines.
#[derive(Clone, Debug, PartialEq)]
pub struct CostBreakdown {
    lines: BTreeMap<Material, Money>,
    rates: BTreeMap<Material, f64>,
    total: Money,
}

impl CostBreakdown {
    /// Assemble a breakdown; `None` if the total overflows.
    pub fn from_lines(
        lines: BTreeMap<Material, Money>,
        rates: BTreeMap<Material, f64>,
    ) -> Option<Self> {
        let total = lines
            .values()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(*m))?;
        Some(Self { lines, rates, total })
    }

    pub fn line(&self, m: Material) -> Money {
        self.lines.get(&m).copied().unwrap_or(Money::ZERO)
    }

    /// Effective unit rate (base rate × combined multiplier).
    pub fn rate(&self, m: Material) -> Option<f64> {
        self.rates.get(&m).copied()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Material, Money)> + '_ {
        self.lines.iter().map(|(m, c)| (*m, *c))
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CostBreakdown {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        struct Lines<'a>(&'a BTreeMap<Material, Money>);
        impl serde::Serialize for Lines<'_> {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_map(self.0.iter().map(|(m, c)| (m.cost_key(), c)))
            }
        }

        struct Rates<'a>(&'a BTreeMap<Material, f64>);
        impl serde::Serialize for Rates<'_> {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_map(self.0.iter().map(|(m, r)| (m.rate_key(), r)))
            }
        }

        let mut st = s.serialize_struct("CostBreakdown", 3)?;
        st.serialize_field("breakdown", &Lines(&self.lines))?;
        st.serialize_field("rates", &Rates(&self.rates))?;
        st.serialize_field("total", &self.total)?;
        st.end()
    }
}

/* -------------------------------- Projection ------------------------------- */

/// Forward-inflated total: `target_year_total = present_total × (1 + annual_rate)^years_ahead`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Projection {
    pub present_total: Money,
    pub target_year_total: Money,
    pub years_ahead: u32,
    pub annual_rate: f64,
}
