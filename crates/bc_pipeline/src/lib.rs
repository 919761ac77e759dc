//! bc_pipeline: the estimation entry point (features → quantities → breakdown
//! → predicted total → projection) and the estimate record builder.
//!
//! This crate stays I/O-free apart from `build_record::write_record`; it
//! delegates JSON/Schema/Hashing to `bc_io` and arithmetic to `bc_algo`.
//! Configuration is an immutable `EstimatorConfig` built once and passed by
//! reference into every call.

#![forbid(unsafe_code)]

use core::fmt;

use bc_algo::{inflation, MultiplierModel, PerSqftFactors, TotalPredictor, DEFAULT_ANNUAL_RATE};
use bc_core::{CostBreakdown, EstimateError, FeatureSet, Money, PricingTable, Projection, QuantityVector};
use bc_io::loader::LoadedPricing;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod build_record;
pub mod features;
pub mod validate;

pub use build_record::{build_record, write_record, EstimateRecord};
pub use features::{resolve_features, BlueprintDimensions, FeatureEstimate, FeatureOverrides, FeatureSource};
pub use validate::{validate_request, Severity, ValidationIssue, ValidationReport};

/// Engine identifiers echoed into every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Engine identifiers (baked by the build system in real deployments).
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: option_env!("BC_ENGINE_VENDOR").unwrap_or("bc").to_string(),
        name: option_env!("BC_ENGINE_NAME").unwrap_or("bc_engine").to_string(),
        version: option_env!("BC_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("BC_ENGINE_BUILD").unwrap_or("dev").to_string(),
    }
}

/// Which total the projection inflates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionBasis {
    /// Sum of the priced material lines (`total_primary`).
    Breakdown,
    /// Directly predicted total (`total_secondary`).
    Predicted,
}

impl ProjectionBasis {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionBasis::Breakdown => "breakdown",
            ProjectionBasis::Predicted => "predicted",
        }
    }
}

/// Single error surface for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Io(String),
    Input(String),
    Config(String),
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Input(m) => write!(f, "input: {m}"),
            PipelineError::Config(m) => write!(f, "config: {m}"),
            PipelineError::Build(m) => write!(f, "build: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<EstimateError> for PipelineError {
    fn from(e: EstimateError) -> Self {
        match e {
            EstimateError::InvalidInput(m) => PipelineError::Input(m),
            EstimateError::Configuration(m) | EstimateError::InvalidConfiguration(m) => {
                PipelineError::Config(m)
            }
        }
    }
}

impl From<bc_io::IoError> for PipelineError {
    fn from(e: bc_io::IoError) -> Self {
        use bc_io::IoError::*;
        match e {
            Config(inner) => inner.into(),
            Schema { pointer, msg } => PipelineError::Config(format!("schema {pointer}: {msg}")),
            Json { pointer, msg } => PipelineError::Config(format!("json {pointer}: {msg}")),
            Hash(m) => PipelineError::Build(format!("hash: {m}")),
            Path(m) => PipelineError::Io(format!("path: {m}")),
            Limit(m) => PipelineError::Io(format!("limit: {m}")),
        }
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone)]
pub struct EstimatorConfig<P = MultiplierModel> {
    pricing: PricingTable,
    pricing_sha256: String,
    factors: PerSqftFactors,
    predictor: P,
    annual_rate: f64,
}

impl EstimatorConfig<MultiplierModel> {
    /// Default factors, default predictor, default inflation rate.
    pub fn new(loaded: LoadedPricing) -> Self {
        EstimatorConfig {
            pricing: loaded.table,
            pricing_sha256: loaded.sha256,
            factors: PerSqftFactors::default(),
            predictor: MultiplierModel::default(),
            annual_rate: DEFAULT_ANNUAL_RATE,
        }
    }
}

impl<P: TotalPredictor> EstimatorConfig<P> {
    /// Replace the total-cost model.
    pub fn with_predictor<Q: TotalPredictor>(self, predictor: Q) -> EstimatorConfig<Q> {
        EstimatorConfig {
            pricing: self.pricing,
            pricing_sha256: self.pricing_sha256,
            factors: self.factors,
            predictor,
            annual_rate: self.annual_rate,
        }
    }

    /// Rejects rates at or below -1 and non-finite rates.
    pub fn with_annual_rate(mut self, annual_rate: f64) -> Result<Self, PipelineError> {
        inflation::check_rate(annual_rate)?;
        self.annual_rate = annual_rate;
        Ok(self)
    }

    pub fn with_factors(mut self, factors: PerSqftFactors) -> Result<Self, PipelineError> {
        factors.validate()?;
        self.factors = factors;
        Ok(self)
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn pricing_sha256(&self) -> &str {
        &self.pricing_sha256
    }

    pub fn factors(&self) -> &PerSqftFactors {
        &self.factors
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }
}

/// Everything one `estimate` call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOutputs {
    pub quantities: QuantityVector,
    pub breakdown: CostBreakdown,
    /// Breakdown-summed total.
    pub total_primary: Money,
    /// Directly predicted total.
    pub total_secondary: Money,
    pub projection: Projection,
    pub basis: ProjectionBasis,
}

/// The one logical operation: Estimate(FeatureSet, years_ahead).
///
/// Fails fast with no partial result. Negative `years_ahead` projects zero years.
pub fn estimate<P: TotalPredictor>(
    cfg: &EstimatorConfig<P>,
    features: &FeatureSet,
    years_ahead: i32,
    basis: ProjectionBasis,
) -> Result<EstimateOutputs, PipelineError> {
    features.validate()?;

    let quantities = cfg.factors.estimate(features)?;
    let breakdown =
        bc_algo::compute_breakdown(&quantities, &features.city, &features.quality, &cfg.pricing)?;
    let total_primary = breakdown.total();
    let total_secondary = cfg.predictor.predict_total(features)?;
    debug!(%total_primary, %total_secondary, "totals computed");

    let base = match basis {
        ProjectionBasis::Breakdown => total_primary,
        ProjectionBasis::Predicted => total_secondary,
    };
    let projection = inflation::project(base, years_ahead, cfg.annual_rate)?;

    info!(
        city = %features.city,
        quality = %features.quality,
        basis = basis.as_str(),
        projected = %projection.target_year_total,
        "estimate complete"
    );

    Ok(EstimateOutputs {
        quantities,
        breakdown,
        total_primary,
        total_secondary,
        projection,
        basis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_core::Material;

    fn cfg() -> EstimatorConfig {
        EstimatorConfig::new(bc_io::loader::builtin_pricing_table().unwrap())
    }

    fn fs() -> FeatureSet {
        FeatureSet::new(1000.0, 2, "Chennai".parse().unwrap(), "standard".parse().unwrap()).unwrap()
    }

    #[test]
    fn both_totals_are_surfaced() {
        let out = estimate(&cfg(), &fs(), 0, ProjectionBasis::Breakdown).unwrap();
        assert_eq!(out.quantities.get(Material::Bricks), 8000);
        assert_eq!(out.total_primary.to_string(), "983232.00");
        assert_eq!(out.total_secondary.to_string(), "4320000.00");
        assert_eq!(out.projection.target_year_total, out.total_primary);
    }

    #[test]
    fn basis_selects_projected_total() {
        let c = cfg();
        let a = estimate(&c, &fs(), 1, ProjectionBasis::Breakdown).unwrap();
        let b = estimate(&c, &fs(), 1, ProjectionBasis::Predicted).unwrap();
        assert_eq!(a.projection.present_total, a.total_primary);
        assert_eq!(b.projection.present_total, b.total_secondary);
        assert_eq!(b.projection.target_year_total.to_string(), "4622400.00");
    }

    #[test]
    fn past_target_year_is_identity() {
        let out = estimate(&cfg(), &fs(), -3, ProjectionBasis::Predicted).unwrap();
        assert_eq!(out.projection.years_ahead, 0);
        assert_eq!(out.projection.target_year_total, out.total_secondary);
    }

    #[test]
    fn config_rejects_bad_rates() {
        assert!(matches!(cfg().with_annual_rate(-1.0), Err(PipelineError::Config(_))));
        assert!(cfg().with_annual_rate(f64::NAN).is_err());
        assert_eq!(cfg().with_annual_rate(0.05).unwrap().annual_rate(), 0.05);
    }

    #[test]
    fn invalid_features_fail_before_pricing() {
        let mut f = fs();
        f.area_sqft = -10.0;
        assert!(matches!(
            estimate(&cfg(), &f, 0, ProjectionBasis::Breakdown),
            Err(PipelineError::Input(_))
        ));
    }

    #[test]
    fn custom_predictor_is_injected() {
        struct Flat;
        impl TotalPredictor for Flat {
            fn predict_total(&self, _: &FeatureSet) -> Result<Money, EstimateError> {
                Ok(Money::from_minor(100))
            }
        }
        let c = cfg().with_predictor(Flat);
        let out = estimate(&c, &fs(), 0, ProjectionBasis::Predicted).unwrap();
        assert_eq!(out.total_secondary, Money::from_minor(100));
    }

    #[test]
    fn custom_factors_change_quantities() {
        let factors = PerSqftFactors {
            bricks: 10.0,
            ..PerSqftFactors::default()
        };
        let c = cfg().with_factors(factors).unwrap();
        assert_eq!(c.factors().bricks, 10.0);
        let out = estimate(&c, &fs(), 0, ProjectionBasis::Breakdown).unwrap();
        assert_eq!(out.quantities.get(Material::Bricks), 10_000);
        assert_eq!(out.quantities.get(Material::Cement), 400);
        assert_eq!(out.breakdown.line(Material::Bricks).to_string(), "93600.00");
    }

    #[test]
    fn negative_factor_is_config_error() {
        let factors = PerSqftFactors {
            steel_kg: -4.0,
            ..PerSqftFactors::default()
        };
        match cfg().with_factors(factors) {
            Err(PipelineError::Config(m)) => assert!(m.contains("steel_kg")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_predictor_is_multiplier_model() {
        let c = cfg();
        assert_eq!(c.predictor(), &MultiplierModel::default());
        assert_eq!(c.predictor().predict_total(&fs()).unwrap().to_string(), "4320000.00");
    }

    #[test]
    fn unrepresentable_projection_is_input_error() {
        let c = cfg().with_annual_rate(1.0).unwrap();
        assert!(matches!(
            estimate(&c, &fs(), 1000, ProjectionBasis::Predicted),
            Err(PipelineError::Input(ref m)) if m.contains("not representable")
        ));
    }

    #[test]
    fn io_errors_map_to_buckets() {
        let e: PipelineError = bc_io::IoError::Limit("big".into()).into();
        assert!(matches!(e, PipelineError::Io(_)));
        let e: PipelineError = bc_io::IoError::Config(EstimateError::configuration("x")).into();
        assert_eq!(e, PipelineError::Config("x".into()));
    }
}
