//! bc_core: Core types for the building cost engine.
//!
//! This crate is **I/O-free**. It defines the stable value types used across
//! the workspace (`bc_io`, `bc_algo`, `bc_pipeline`, `bc_cli`):
//!
//! - City and quality keys, with the single canonicalization table for
//!   quality tiers and city aliases
//! - The five material categories and their quantity/rate/cost keys
//! - `Money` in integer minor units (2-decimal rounding happens once)
//! - `FeatureSet`, `QuantityVector`, `CostBreakdown`, `Projection`
//! - `PricingTable` with its graceful multiplier lookups
//! - The `EstimateError` taxonomy
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors;
pub mod features;
pub mod keys;
pub mod materials;
pub mod money;
pub mod pricing;

pub use errors::EstimateError;
pub use features::FeatureSet;
pub use keys::{CityKey, QualityKey, QualityTier};
pub use materials::{CostBreakdown, Material, Projection, QuantityVector};
pub use money::{Money, MAX_MINOR};
pub use pricing::{PricingTable, NEUTRAL_MULTIPLIER};
