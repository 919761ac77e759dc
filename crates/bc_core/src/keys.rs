//! crates/bc_core/src/keys.rs
//! City and quality keys plus the canonicalization tables consulted before
//! every pricing lookup. Deterministic, no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;

const KEY_MAX_LEN: usize = 64;

/// City aliases seen across call sites, mapped to the pricing-table spelling.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("Bengaluru", "Bangalore"),
    ("Bombay", "Mumbai"),
    ("Madras", "Chennai"),
    ("New Delhi", "Delhi"),
];

/// Quality synonyms → canonical tier token. Keys are already lower-cased and
/// have internal whitespace collapsed to a single space.
const QUALITY_SYNONYMS: &[(&str, &str)] = &[
    ("basic", "economical"),
    ("economy", "economical"),
    ("economical", "economical"),
    ("standard", "standard"),
    ("premium", "premium"),
    ("high-end", "high-end"),
    ("high_end", "high-end"),
    ("highend", "high-end"),
    ("high end", "high-end"),
];

/// Trim and collapse runs of whitespace to one ASCII space.
fn squash_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn check_len(kind: &'static str, s: &str) -> Result<(), EstimateError> {
    if s.is_empty() {
        return Err(EstimateError::invalid_input(format!("{kind} must not be empty")));
    }
    if s.chars().count() > KEY_MAX_LEN {
        return Err(EstimateError::invalid_input(format!(
            "{kind} longer than {KEY_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Canonical city key. Lookups are case-sensitive on the canonical spelling.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CityKey(String);

impl CityKey {
    /// Trim, collapse whitespace, then resolve aliases.
    pub fn canonicalize(raw: &str) -> String {
        let s = squash_ws(raw);
        CITY_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(&s))
            .map(|(_, canon)| (*canon).to_string())
            .unwrap_or(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CityKey {
    type Err = EstimateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canon = Self::canonicalize(s);
        check_len("city", &canon)?;
        Ok(Self(canon))
    }
}

impl TryFrom<String> for CityKey {
    type Error = EstimateError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CityKey> for String {
    fn from(k: CityKey) -> String {
        k.0
    }
}

/// Known quality tiers, in ascending finish grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    Economical,
    Standard,
    Premium,
    HighEnd,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Economical,
        QualityTier::Standard,
        QualityTier::Premium,
        QualityTier::HighEnd,
    ];

    /// Canonical pricing-table token.
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Economical => "economical",
            QualityTier::Standard => "standard",
            QualityTier::Premium => "premium",
            QualityTier::HighEnd => "high-end",
        }
    }

    fn from_canonical(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical quality key.
///
/// Known synonyms ("basic", "high_end", ...) resolve to their tier token.
/// Unknown tokens are kept (lower-cased) so the lookup can degrade to the
/// neutral multiplier instead of failing.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct QualityKey(String);

impl QualityKey {
    /// The single canonicalization table for quality names.
    pub fn canonicalize(raw: &str) -> String {
        let s = squash_ws(raw).to_lowercase();
        QUALITY_SYNONYMS
            .iter()
            .find(|(syn, _)| *syn == s)
            .map(|(_, canon)| (*canon).to_string())
            .unwrap_or(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Some(tier)` when the key names a known tier.
    pub fn tier(&self) -> Option<QualityTier> {
        QualityTier::from_canonical(&self.0)
    }
}

impl From<QualityTier> for QualityKey {
    fn from(t: QualityTier) -> Self {
        QualityKey(t.as_str().to_string())
    }
}

impl fmt::Display for QualityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QualityKey {
    type Err = EstimateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canon = Self::canonicalize(s);
        check_len("quality", &canon)?;
        Ok(Self(canon))
    }
}

impl TryFrom<String> for QualityKey {
    type Error = EstimateError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QualityKey> for String {
    fn from(k: QualityKey) -> String {
        k.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> QualityKey {
        s.parse().unwrap()
    }

    #[test]
    fn quality_synonyms_resolve_to_tiers() {
        assert_eq!(q("basic").as_str(), "economical");
        assert_eq!(q("  Basic ").as_str(), "economical");
        assert_eq!(q("HIGH_END").as_str(), "high-end");
        assert_eq!(q("high   end").as_str(), "high-end");
        assert_eq!(q("Standard").tier(), Some(QualityTier::Standard));
    }

    #[test]
    fn unknown_quality_is_kept_lowercased() {
        let k = q("Deluxe");
        assert_eq!(k.as_str(), "deluxe");
        assert_eq!(k.tier(), None);
    }

    #[test]
    fn city_aliases_and_whitespace() {
        let c: CityKey = " Bengaluru ".parse().unwrap();
        assert_eq!(c.as_str(), "Bangalore");
        let c: CityKey = "new   delhi".parse().unwrap();
        assert_eq!(c.as_str(), "Delhi");
        // Non-alias names are kept verbatim (case preserved).
        let c: CityKey = "Coimbatore".parse().unwrap();
        assert_eq!(c.as_str(), "Coimbatore");
    }

    #[test]
    fn empty_keys_are_invalid_input() {
        assert!(matches!("   ".parse::<CityKey>(), Err(EstimateError::InvalidInput(_))));
        assert!(matches!("".parse::<QualityKey>(), Err(EstimateError::InvalidInput(_))));
        let long = "x".repeat(65);
        assert!(long.parse::<CityKey>().is_err());
    }

    #[test]
    fn tier_round_trips_through_key() {
        for t in QualityTier::ALL {
            assert_eq!(QualityKey::from(t).tier(), Some(t));
        }
    }
}
