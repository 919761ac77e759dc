// crates/bc_pipeline/src/build_record.rs
//
// Estimate record: echo of the resolved inputs, every computed value, engine
// identity and the pricing digest.
//
// - Record ID = "EST:" + first 16 hex of SHA-256 over the canonical JSON of
//   the record body (everything except `id`).
// - No timestamps: identical inputs and pricing give an identical id.

use std::path::Path;

use bc_core::{CostBreakdown, FeatureSet, Money, Projection, QuantityVector};
use bc_io::{canonical_json, hasher};
use serde::Serialize;

use crate::{EngineMeta, EstimateOutputs, PipelineError, ProjectionBasis};

/// Everything hashed into the id.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateBody {
    pub engine: EngineMeta,
    pub pricing_sha256: String,
    pub features: FeatureSet,
    /// As requested (may be negative); the projection carries the clamped value.
    pub years_ahead_requested: i32,
    pub projection_basis: ProjectionBasis,
    pub quantities: QuantityVector,
    pub cost: CostBreakdown,
    pub total_primary: Money,
    pub total_secondary: Money,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateRecord {
    pub id: String,
    #[serde(flatten)]
    pub body: EstimateBody,
}

impl EstimateRecord {
    pub fn to_value(&self) -> Result<serde_json::Value, PipelineError> {
        serde_json::to_value(self).map_err(|e| PipelineError::Build(format!("record to JSON: {e}")))
    }
}

pub fn build_record(
    engine: EngineMeta,
    pricing_sha256: &str,
    features: &FeatureSet,
    years_ahead_requested: i32,
    outputs: &EstimateOutputs,
) -> Result<EstimateRecord, PipelineError> {
    let body = EstimateBody {
        engine,
        pricing_sha256: pricing_sha256.to_string(),
        features: features.clone(),
        years_ahead_requested,
        projection_basis: outputs.basis,
        quantities: outputs.quantities.clone(),
        cost: outputs.breakdown.clone(),
        total_primary: outputs.total_primary,
        total_secondary: outputs.total_secondary,
        projection: outputs.projection.clone(),
    };
    let id = hasher::estimate_id_from_canonical(&body)?;
    Ok(EstimateRecord { id, body })
}

/// Write the record atomically in canonical form.
pub fn write_record(path: &Path, record: &EstimateRecord) -> Result<(), PipelineError> {
    let v = record.to_value()?;
    canonical_json::write_canonical_file(path, &v)
        .map_err(|e| PipelineError::Io(format!("write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine_identifiers, estimate, EstimatorConfig};

    fn record(years: i32) -> EstimateRecord {
        let cfg = EstimatorConfig::new(bc_io::loader::builtin_pricing_table().unwrap());
        let fs = FeatureSet::new(1000.0, 2, "Chennai".parse().unwrap(), "standard".parse().unwrap())
            .unwrap();
        let out = estimate(&cfg, &fs, years, ProjectionBasis::Predicted).unwrap();
        build_record(engine_identifiers(), cfg.pricing_sha256(), &fs, years, &out).unwrap()
    }

    #[test]
    fn id_is_stable_and_input_sensitive() {
        let a = record(0);
        assert!(a.id.starts_with(hasher::ESTIMATE_ID_PREFIX));
        assert_eq!(a.id, record(0).id);
        assert_ne!(a.id, record(2).id);
    }

    #[test]
    fn id_excludes_itself() {
        let r = record(1);
        assert_eq!(r.id, hasher::estimate_id_from_canonical(&r.body).unwrap());
        let v = r.to_value().unwrap();
        assert_eq!(v["id"], serde_json::Value::String(r.id.clone()));
        assert_eq!(v["projection_basis"], "predicted");
    }

    #[test]
    fn written_record_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimate.json");
        let r = record(0);
        write_record(&path, &r).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\"cost\":"));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["id"], serde_json::Value::String(r.id.clone()));
        assert_eq!(v["quantities"]["bricks_count"], 8000);
    }
}
