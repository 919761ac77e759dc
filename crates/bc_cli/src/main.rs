// crates/bc_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, logging, CLI parsing, the
// validate-only short-circuit and the estimate path (load pricing → resolve
// features → validate → estimate → record → stdout / --out).
//
// stdout carries JSON only; logs go to stderr.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    /// Bad arguments or an invalid request.
    pub const INPUT: u8 = 2;
    /// Pricing table or inflation rate unusable.
    pub const CONFIG: u8 = 3;
    pub const IO: u8 = 4;
}

use std::process::ExitCode;

use chrono::Datelike;
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{parse_and_validate as parse_cli, Args};
use bc_core::{CityKey, QualityKey};
use bc_io::loader::{self, LoadedPricing};
use bc_pipeline::{
    build_record, engine_identifiers, estimate, resolve_features, validate_request, write_record,
    BlueprintDimensions, EstimatorConfig, FeatureOverrides, FeatureSource, PipelineError,
    ValidationReport,
};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Input(String),
    Config(String),
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Input(m) => write!(f, "invalid input: {m}"),
            MainError::Config(m) => write!(f, "configuration: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("bce: error: {e}");
            return ExitCode::from(exitcodes::INPUT);
        }
    };
    init_tracing(args.quiet);

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("bce: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc)
}

/// Default `warn`, `RUST_LOG` overrides, `--quiet` forces `error`.
fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), MainError> {
    let loaded = load_pricing(args)?;
    let mut cfg = EstimatorConfig::new(loaded);
    if let Some(rate) = args.inflation_rate {
        cfg = cfg.with_annual_rate(rate).map_err(map_pipeline_err)?;
    }

    let city: CityKey = args.city.parse().map_err(|e| MainError::Input(format!("{e}")))?;
    let quality: QualityKey = args.quality.parse().map_err(|e| MainError::Input(format!("{e}")))?;

    let blueprint = match (args.blueprint_width, args.blueprint_height) {
        (Some(width_px), Some(height_px)) => Some(BlueprintDimensions { width_px, height_px }),
        _ => None,
    };
    let overrides = FeatureOverrides {
        area_sqft: args.area,
        rooms_estimate: args.rooms,
        wall_length_ft: args.wall_length,
    };
    let resolved = resolve_features(blueprint.as_ref().map(|b| b as &dyn FeatureSource), &overrides);
    let features = resolved.into_feature_set(args.floors, city, quality);

    let report = validate_request(&features, cfg.pricing());
    for issue in report.warnings() {
        warn!(code = issue.code, field = issue.field, "{}", issue.message);
    }

    if args.validate_only {
        print_json(&report_json(&report, cfg.pricing_sha256()))?;
        return if report.pass {
            Ok(())
        } else {
            Err(MainError::Input("request failed validation".into()))
        };
    }
    if !report.pass {
        let msgs: Vec<&str> = report.errors().map(|i| i.message.as_str()).collect();
        return Err(MainError::Input(msgs.join("; ")));
    }

    let years = years_ahead(args);
    debug!(years, "projection horizon");
    let outputs = estimate(&cfg, &features, years, args.projection_basis.into()).map_err(map_pipeline_err)?;
    let record = build_record(engine_identifiers(), cfg.pricing_sha256(), &features, years, &outputs)
        .map_err(map_pipeline_err)?;

    if let Some(path) = &args.out {
        write_record(path, &record).map_err(map_pipeline_err)?;
    }
    print_json(&record.to_value().map_err(map_pipeline_err)?)
}

fn load_pricing(args: &Args) -> Result<LoadedPricing, MainError> {
    let res = match &args.pricing {
        Some(path) => loader::load_pricing_table(path),
        None => loader::builtin_pricing_table(),
    };
    res.map_err(|e| map_pipeline_err(e.into()))
}

fn years_ahead(args: &Args) -> i32 {
    match args.years_ahead {
        Some(y) => y,
        None => {
            let current = args.current_year.unwrap_or_else(|| chrono::Local::now().year());
            bc_algo::years_between(current, args.target_year)
        }
    }
}

fn report_json(report: &ValidationReport, pricing_sha256: &str) -> serde_json::Value {
    let issues: Vec<serde_json::Value> = report
        .issues
        .iter()
        .map(|i| {
            json!({
                "severity": i.severity.as_str(),
                "code": i.code,
                "field": i.field,
                "message": i.message,
            })
        })
        .collect();
    json!({ "pass": report.pass, "pricing_sha256": pricing_sha256, "issues": issues })
}

fn print_json(v: &serde_json::Value) -> Result<(), MainError> {
    let text = serde_json::to_string_pretty(v).map_err(|e| MainError::Io(format!("stdout: {e}")))?;
    println!("{text}");
    Ok(())
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Input(_) => exitcodes::INPUT,
        MainError::Config(_) => exitcodes::CONFIG,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Input(m) => MainError::Input(m),
        PipelineError::Config(m) => MainError::Config(m),
        PipelineError::Io(m) | PipelineError::Build(m) => MainError::Io(m),
    }
}
