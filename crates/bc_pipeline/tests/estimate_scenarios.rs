// End-to-end scenarios over the built-in pricing table: features → record.

use assert_json_diff::assert_json_include;
use bc_io::loader::{builtin_pricing_table, parse_pricing_str};
use bc_pipeline::{
    build_record, engine_identifiers, estimate, resolve_features, validate_request,
    BlueprintDimensions, EstimatorConfig, FeatureOverrides, PipelineError, ProjectionBasis,
};
use serde_json::json;

fn cfg() -> EstimatorConfig {
    EstimatorConfig::new(builtin_pricing_table().unwrap())
}

fn manual(area: f64, city: &str, quality: &str) -> bc_core::FeatureSet {
    let ov = FeatureOverrides {
        area_sqft: Some(area),
        ..FeatureOverrides::default()
    };
    resolve_features(None, &ov).into_feature_set(2, city.parse().unwrap(), quality.parse().unwrap())
}

#[test]
fn chennai_standard_record_shape() {
    let cfg = cfg();
    let fs = manual(1000.0, "Chennai", "standard");
    let out = estimate(&cfg, &fs, -3, ProjectionBasis::Breakdown).unwrap();
    let rec = build_record(engine_identifiers(), cfg.pricing_sha256(), &fs, -3, &out).unwrap();

    assert_json_include!(
        actual: rec.to_value().unwrap(),
        expected: json!({
            "features": {
                "area_sqft": 1000.0,
                "floors": 2,
                "city": "Chennai",
                "quality": "standard",
                "rooms_estimate": 5,
                "wall_length_ft": 120.0
            },
            "years_ahead_requested": -3,
            "projection_basis": "breakdown",
            "quantities": {
                "bricks_count": 8000,
                "cement_bags": 400,
                "steel_kg": 4000,
                "paint_liters": 180,
                "worker_days": 120
            },
            "cost": {
                "breakdown": {
                    "bricks": 74880.0,
                    "cement": 218880.0,
                    "steel": 449280.0,
                    "paint": 67392.0,
                    "labor": 172800.0
                },
                "total": 983232.0
            },
            "total_primary": 983232.0,
            "total_secondary": 4320000.0,
            "projection": {
                "present_total": 983232.0,
                "target_year_total": 983232.0,
                "years_ahead": 0,
                "annual_rate": 0.07
            }
        })
    );
}

#[test]
fn aliases_and_synonyms_price_like_canonical_keys() {
    let cfg = cfg();
    let a = estimate(&cfg, &manual(800.0, "Bengaluru", "basic"), 0, ProjectionBasis::Breakdown).unwrap();
    let b = estimate(&cfg, &manual(800.0, "Bangalore", "economical"), 0, ProjectionBasis::Breakdown).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_city_warns_and_prices_neutral() {
    let cfg = cfg();
    let fs = manual(1000.0, "Atlantis", "standard");
    let report = validate_request(&fs, cfg.pricing());
    assert!(report.pass);
    assert!(report.warnings().any(|i| i.code == "Pricing.CityFallback"));

    let out = estimate(&cfg, &fs, 0, ProjectionBasis::Breakdown).unwrap();
    // 682,800 at base rates × 1.2 for standard quality
    assert_eq!(out.total_primary.to_string(), "819360.00");
}

#[test]
fn blueprint_source_feeds_quantities() {
    let cfg = cfg();
    let src = BlueprintDimensions { width_px: 1000, height_px: 800 };
    let fs = resolve_features(Some(&src), &FeatureOverrides::default())
        .into_feature_set(1, "Delhi".parse().unwrap(), "premium".parse().unwrap());
    let out = estimate(&cfg, &fs, 2, ProjectionBasis::Predicted).unwrap();
    let v = serde_json::to_value(&out.quantities).unwrap();
    assert_json_include!(actual: v, expected: json!({"bricks_count": 7680, "worker_days": 115}));
    assert_eq!(out.projection.years_ahead, 2);
}

#[test]
fn pricing_file_without_rate_is_fatal_at_load() {
    let err = parse_pricing_str(r#"{"base":{"brick_per_1000":6500}}"#).unwrap_err();
    assert!(matches!(PipelineError::from(err), PipelineError::Config(_)));
}

#[test]
fn zero_area_is_rejected() {
    let fs = manual(0.0, "Chennai", "standard");
    assert!(!validate_request(&fs, cfg().pricing()).pass);
    assert!(matches!(
        estimate(&cfg(), &fs, 0, ProjectionBasis::Breakdown),
        Err(PipelineError::Input(_))
    ));
}
