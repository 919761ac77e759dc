//! Feature Source contract and override resolution.
//!
//! A source yields {area, rooms, wall length} or nothing. Whatever it yields is
//! clamped to the documented ranges; nothing at all means the fixed fallback.
//! Manual overrides replace individual fields strictly after extraction.

use bc_core::{CityKey, FeatureSet, QualityKey};
use tracing::{debug, warn};

pub const AREA_RANGE_SQFT: (f64, f64) = (300.0, 6000.0);
pub const WALL_RANGE_FT: (f64, f64) = (40.0, 1200.0);
pub const ROOMS_RANGE: (u32, u32) = (1, 12);

/// Used when extraction is not possible or no source is given.
pub const FALLBACK_FEATURES: FeatureEstimate = FeatureEstimate {
    area_sqft: 900.0,
    rooms_estimate: 5,
    wall_length_ft: 120.0,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureEstimate {
    pub area_sqft: f64,
    pub rooms_estimate: u32,
    pub wall_length_ft: f64,
}

impl FeatureEstimate {
    /// Clamp every field into its documented range. NaN falls to the low end.
    pub fn clamped(self) -> Self {
        FeatureEstimate {
            area_sqft: clamp_f64(self.area_sqft, AREA_RANGE_SQFT),
            rooms_estimate: self.rooms_estimate.clamp(ROOMS_RANGE.0, ROOMS_RANGE.1),
            wall_length_ft: clamp_f64(self.wall_length_ft, WALL_RANGE_FT),
        }
    }

    /// Attach the request-level fields. The result is not validated; run
    /// `validate::validate_request` or `FeatureSet::validate` before pricing.
    pub fn into_feature_set(self, floors: u32, city: CityKey, quality: QualityKey) -> FeatureSet {
        FeatureSet {
            area_sqft: self.area_sqft,
            floors,
            city,
            quality,
            rooms_estimate: self.rooms_estimate,
            wall_length_ft: self.wall_length_ft,
        }
    }
}

fn clamp_f64(x: f64, (lo, hi): (f64, f64)) -> f64 {
    if x.is_nan() {
        lo
    } else {
        x.clamp(lo, hi)
    }
}

/// Upstream provider of feature estimates.
pub trait FeatureSource {
    /// `None` when extraction is not possible.
    fn extract(&self) -> Option<FeatureEstimate>;
}

/// Pixel-dimension heuristic for a scanned blueprint.
///
/// scale = w·h / 10⁶; area = scale·1200; rooms = clamp(⌊scale·6⌋, 2, 10);
/// walls = (w + h)·0.08. Area and wall length are reported to one decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlueprintDimensions {
    pub width_px: u32,
    pub height_px: u32,
}

impl FeatureSource for BlueprintDimensions {
    fn extract(&self) -> Option<FeatureEstimate> {
        if self.width_px == 0 || self.height_px == 0 {
            return None;
        }
        let (w, h) = (f64::from(self.width_px), f64::from(self.height_px));
        let scale = w * h / 1_000_000.0;
        // floor then clamp; the float-to-int cast saturates
        let rooms = ((scale * 6.0).floor() as u32).clamp(2, 10);
        Some(FeatureEstimate {
            area_sqft: round_tenth(scale * 1200.0),
            rooms_estimate: rooms,
            wall_length_ft: round_tenth((w + h) * 0.08),
        })
    }
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Manual values; each `Some` replaces the extracted field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureOverrides {
    pub area_sqft: Option<f64>,
    pub rooms_estimate: Option<u32>,
    pub wall_length_ft: Option<f64>,
}

impl FeatureOverrides {
    pub fn is_empty(&self) -> bool {
        self.area_sqft.is_none() && self.rooms_estimate.is_none() && self.wall_length_ft.is_none()
    }

    pub fn apply(&self, base: FeatureEstimate) -> FeatureEstimate {
        FeatureEstimate {
            area_sqft: self.area_sqft.unwrap_or(base.area_sqft),
            rooms_estimate: self.rooms_estimate.unwrap_or(base.rooms_estimate),
            wall_length_ft: self.wall_length_ft.unwrap_or(base.wall_length_ft),
        }
    }
}

/// Extract (or fall back), clamp, then apply overrides.
pub fn resolve_features(
    source: Option<&dyn FeatureSource>,
    overrides: &FeatureOverrides,
) -> FeatureEstimate {
    let extracted = match source.map(|s| s.extract()) {
        Some(Some(est)) => est.clamped(),
        Some(None) => {
            warn!("feature extraction not possible; using fallback features");
            FALLBACK_FEATURES
        }
        None => FALLBACK_FEATURES,
    };
    let resolved = overrides.apply(extracted);
    debug!(?extracted, ?resolved, "features resolved");
    resolved
}
