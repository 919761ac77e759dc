// End-to-end tests for the `bce` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn bce() -> Command {
    let mut cmd = Command::cargo_bin("bce").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn scenario_record_on_stdout() {
    let v = stdout_json(bce().args([
        "--area", "1000", "--years-ahead", "0", "--projection-basis", "breakdown",
    ]));
    assert!(v["id"].as_str().unwrap().starts_with("EST:"));
    assert_eq!(v["quantities"]["bricks_count"], 8000);
    assert_eq!(v["cost"]["breakdown"]["bricks"], 74880.0);
    assert_eq!(v["cost"]["breakdown"]["cement"], 218880.0);
    assert_eq!(v["total_primary"], 983232.0);
    assert_eq!(v["total_secondary"], 4320000.0);
    assert_eq!(v["projection"]["target_year_total"], 983232.0);
}

#[test]
fn past_target_year_projects_zero_years() {
    let v = stdout_json(bce().args([
        "--area", "1000", "--target-year", "2020", "--current-year", "2023",
    ]));
    assert_eq!(v["years_ahead_requested"], -3);
    assert_eq!(v["projection"]["years_ahead"], 0);
    assert_eq!(v["projection"]["target_year_total"], v["total_secondary"]);
}

#[test]
fn one_year_ahead_inflates_predicted_total() {
    let v = stdout_json(bce().args(["--area", "1000", "--years-ahead", "1"]));
    assert_eq!(v["projection_basis"], "predicted");
    assert_eq!(v["projection"]["target_year_total"], 4622400.0);
}

#[test]
fn zero_area_exits_2() {
    bce()
        .args(["--area", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("area_sqft"));
}

#[test]
fn bad_inflation_rate_exits_3() {
    bce()
        .args(["--area", "1000", "--inflation-rate", "-1"])
        .assert()
        .code(3);
}

#[test]
fn unrepresentable_projection_exits_2() {
    bce()
        .args(["--area", "1000", "--years-ahead", "1000", "--inflation-rate", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not representable"));
}

#[test]
fn pricing_without_base_rate_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("pricing.json");
    fs::write(&p, r#"{"base":{"brick_per_1000":6500,"cement_bag":380}}"#).unwrap();
    bce()
        .arg("--pricing")
        .arg(&p)
        .args(["--area", "1000"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("steel_kg"));
}

#[test]
fn missing_pricing_file_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    bce()
        .arg("--pricing")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(4);
}

#[test]
fn validate_only_reports_fallbacks() {
    let v = stdout_json(bce().args(["--city", "Atlantis", "--validate-only", "--quiet"]));
    assert_eq!(v["pass"], true);
    let codes: Vec<&str> = v["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["Pricing.CityFallback"]);
}

#[test]
fn out_writes_canonical_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records").join("estimate.json");
    let v = stdout_json(
        bce()
            .args(["--area", "1000", "--years-ahead", "0", "--quiet", "--out"])
            .arg(&path),
    );
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.ends_with('\n'));
    let written: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(written["id"], v["id"]);
}

#[test]
fn blueprint_dimensions_drive_area() {
    let v = stdout_json(bce().args([
        "--blueprint-width", "1000", "--blueprint-height", "800", "--years-ahead", "0",
    ]));
    assert_eq!(v["features"]["rooms_estimate"], 4);
    assert_eq!(v["quantities"]["bricks_count"], 7680);
}

#[test]
fn unknown_flag_exits_2() {
    bce().arg("--bogus").assert().code(2);
}

#[test]
fn url_pricing_path_is_rejected() {
    bce()
        .args(["--pricing", "https://example.com/pricing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("local"));
}
