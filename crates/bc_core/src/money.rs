//! Integer-first money.
//!
//! Amounts are held in minor units (hundredths) so that sums of rounded
//! lines are exact. Conversion from `f64` rounds to the nearest hundredth
//! (halves away from zero) exactly once, and floors negatives at zero.
//!
//! Records carry major units as JSON numbers (`f64`). Below `MAX_MINOR` every
//! cent maps to a distinct `f64`, so arithmetic refuses to go past it and
//! serialization rejects anything larger instead of losing cents.

use core::fmt;

/// Non-negative monetary amount in hundredths of the currency unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    minor: u64,
}

/// Largest amount (10¹³ major units) that serializes exactly to the cent.
pub const MAX_MINOR: u64 = 1_000_000_000_000_000;

impl Money {
    pub const ZERO: Money = Money { minor: 0 };

    #[inline]
    pub const fn from_minor(minor: u64) -> Self {
        Money { minor }
    }

    /// Round a major-unit amount to 2 decimals. Negative input floors to zero.
    /// Returns `None` for NaN/inf or amounts above `MAX_MINOR`.
    pub fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        if amount <= 0.0 {
            return Some(Money::ZERO);
        }
        let minor = (amount * 100.0).round();
        if minor > MAX_MINOR as f64 {
            return None;
        }
        Some(Money { minor: minor as u64 })
    }

    #[inline]
    pub const fn minor(self) -> u64 {
        self.minor
    }

    /// Major-unit value (e.g. `74880.0`).
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.minor as f64 / 100.0
    }

    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.minor
            .checked_add(other.minor)
            .filter(|m| *m <= MAX_MINOR)
            .map(Money::from_minor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.minor / 100, self.minor % 100)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if self.minor > MAX_MINOR {
            return Err(serde::ser::Error::custom(format!(
                "amount {self} exceeds the serializable maximum"
            )));
        }
        s.serialize_f64(self.as_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as _, Unexpected};
        let v = f64::deserialize(d)?;
        if v < 0.0 {
            return Err(D::Error::invalid_value(Unexpected::Float(v), &"a non-negative amount"));
        }
        Money::from_amount(v)
            .ok_or_else(|| D::Error::invalid_value(Unexpected::Float(v), &"a finite amount"))
    }
}
