//! crates/bc_pipeline/src/validate.rs
//! Request validation before any computation.
//! Deterministic outputs: issues are sorted by (code, field, message).
//!
//! Errors block the estimate; warnings only flag neutral-multiplier
//! fallbacks and advisory fields outside the feature clamp ranges.

use bc_core::{FeatureSet, PricingTable};

use crate::features::{AREA_RANGE_SQFT, ROOMS_RANGE, WALL_RANGE_FT};

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One validation finding. `field` names the FeatureSet field concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub field: &'static str,
}

/// pass = no Error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Top-level entry point.
pub fn validate_request(features: &FeatureSet, pricing: &PricingTable) -> ValidationReport {
    let mut issues = Vec::new();

    issues.extend(check_features(features));
    issues.extend(check_advisory_ranges(features));
    issues.extend(check_pricing_keys(features, pricing));

    sort_issues_stably(&mut issues);

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

fn error(code: &'static str, field: &'static str, message: String) -> ValidationIssue {
    ValidationIssue { severity: Severity::Error, code, message, field }
}

fn warning(code: &'static str, field: &'static str, message: String) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, field }
}

fn check_features(f: &FeatureSet) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if !f.area_sqft.is_finite() || f.area_sqft <= 0.0 {
        issues.push(error(
            "Features.AreaNotPositive",
            "area_sqft",
            format!("area_sqft must be a positive number, got {}", f.area_sqft),
        ));
    }
    if f.floors == 0 {
        issues.push(error("Features.FloorsZero", "floors", "floors must be >= 1".to_string()));
    }
    if !f.wall_length_ft.is_finite() || f.wall_length_ft < 0.0 {
        issues.push(error(
            "Features.WallLengthNegative",
            "wall_length_ft",
            format!("wall_length_ft must be a non-negative number, got {}", f.wall_length_ft),
        ));
    }
    issues
}

/// Overridden values may sit outside the extraction clamps; flag but accept.
fn check_advisory_ranges(f: &FeatureSet) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let (lo, hi) = AREA_RANGE_SQFT;
    if f.area_sqft.is_finite() && f.area_sqft > 0.0 && !(lo..=hi).contains(&f.area_sqft) {
        issues.push(warning(
            "Features.AreaOutsideRange",
            "area_sqft",
            format!("area_sqft {} outside {lo}..={hi}", f.area_sqft),
        ));
    }
    let (lo, hi) = ROOMS_RANGE;
    if !(lo..=hi).contains(&f.rooms_estimate) {
        issues.push(warning(
            "Features.RoomsOutsideRange",
            "rooms_estimate",
            format!("rooms_estimate {} outside {lo}..={hi}", f.rooms_estimate),
        ));
    }
    let (lo, hi) = WALL_RANGE_FT;
    if f.wall_length_ft.is_finite() && f.wall_length_ft >= 0.0 && !(lo..=hi).contains(&f.wall_length_ft) {
        issues.push(warning(
            "Features.WallLengthOutsideRange",
            "wall_length_ft",
            format!("wall_length_ft {} outside {lo}..={hi}", f.wall_length_ft),
        ));
    }
    issues
}

fn check_pricing_keys(f: &FeatureSet, pricing: &PricingTable) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if pricing.find_city_multiplier(&f.city).is_none() {
        issues.push(warning(
            "Pricing.CityFallback",
            "city",
            format!("city '{}' not in pricing table; multiplier 1.0", f.city),
        ));
    }
    if pricing.find_quality_multiplier(&f.quality).is_none() {
        issues.push(warning(
            "Pricing.QualityFallback",
            "quality",
            format!("quality '{}' not in pricing table; multiplier 1.0", f.quality),
        ));
    }
    issues
}

fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.code
            .cmp(b.code)
            .then_with(|| a.field.cmp(b.field))
            .then_with(|| a.message.cmp(&b.message))
    });
}
