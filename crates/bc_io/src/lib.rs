//! bc_io: the only crate in the engine that touches the filesystem.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Pricing tables are read with a size limit, validated against an embedded
//!   JSON Schema, then canonicalized and checked by `bc_core::PricingTable::checked`.
//! - Canonical JSON + SHA-256 give stable digests for pricing tables and ids
//!   for estimate records.

#![forbid(unsafe_code)]

use bc_core::EstimateError;
use thiserror::Error;

/// Unified error for bc_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON syntax or shape errors with a JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures (first violation).
    #[error("schema error at {pointer}: {msg}")]
    Schema { pointer: String, msg: String },

    /// Input exceeded a read limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Semantically invalid pricing configuration.
    #[error(transparent)]
    Config(#[from] EstimateError),

    /// Canonicalization / hashing failures.
    #[error("hash error: {0}")]
    Hash(String),
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json doesn't keep a pointer; callers may enrich this.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod schema;

