//! Loader: read a local pricing-table JSON file (or the built-in table),
//! validate it against the embedded schema, canonicalize its multiplier keys,
//! check it semantically, and return it with its canonical digest.
//! Loaded once at startup; the result is never mutated afterwards.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bc_core::PricingTable;
use serde_json::Value;
use tracing::{debug, info};

use crate::{hasher, schema, IoError};

/// Upper bound on pricing-table file size.
pub const MAX_PRICING_BYTES: u64 = 1024 * 1024;

const BUILTIN_PRICING: &str = include_str!("../pricing/default_pricing.json");

/// Where a pricing table came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PricingSource {
    Builtin,
    File(PathBuf),
}

/// A validated pricing table plus the SHA-256 of its canonical JSON.
#[derive(Clone, Debug)]
pub struct LoadedPricing {
    pub table: PricingTable,
    pub sha256: String,
    pub source: PricingSource,
}

/// Load and validate a pricing table from a local file.
pub fn load_pricing_table(path: &Path) -> Result<LoadedPricing, IoError> {
    let v = read_json_value_with_limits(path, MAX_PRICING_BYTES)?;
    let (table, sha256) = pricing_from_value(v)?;
    info!(path = %path.display(), sha256 = %sha256, "pricing table loaded");
    Ok(LoadedPricing {
        table,
        sha256,
        source: PricingSource::File(path.to_path_buf()),
    })
}

/// The pricing table shipped with the engine.
pub fn builtin_pricing_table() -> Result<LoadedPricing, IoError> {
    let (table, sha256) = parse_pricing_str(BUILTIN_PRICING)?;
    debug!(sha256 = %sha256, "built-in pricing table loaded");
    Ok(LoadedPricing {
        table,
        sha256,
        source: PricingSource::Builtin,
    })
}

/// Parse + validate pricing JSON text. Returns the table and its digest.
pub fn parse_pricing_str(text: &str) -> Result<(PricingTable, String), IoError> {
    let v: Value = serde_json::from_str(text)?;
    pricing_from_value(v)
}

fn pricing_from_value(v: Value) -> Result<(PricingTable, String), IoError> {
    schema::validate_value(schema::SchemaKind::PricingTable, &v)?;
    let raw: PricingTable = serde_json::from_value(v)?;
    let table = raw.checked()?;
    let sha256 = hasher::sha256_canonical(&table)?;
    Ok((table, sha256))
}

/// Read a JSON file, refusing anything larger than `max_bytes`.
pub fn read_json_value_with_limits(path: &Path, max_bytes: u64) -> Result<Value, IoError> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let mut buf = Vec::new();
    f.take(max_bytes + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > max_bytes {
        return Err(IoError::Limit(format!(
            "{} is larger than {max_bytes} bytes",
            path.display()
        )));
    }
    serde_json::from_slice(&buf).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: format!("{}: {e}", path.display()),
    })
}
