// crates/bc_algo/src/lib.rs
#![forbid(unsafe_code)]

//! The four pure components of the estimator. No I/O, no shared state; every
//! call is independent and may run on any thread.
//!
//! features → `quantities` → `breakdown` (priced lines + total)
//! features → `predictor` (independent total)
//! either total → `inflation` (projection)

pub mod breakdown;
pub mod inflation;
pub mod predictor;
pub mod quantities;

// Tight, explicit re-exports (pipeline imports these from crate root).
pub use breakdown::compute_breakdown;
pub use inflation::{project, years_between, DEFAULT_ANNUAL_RATE};
pub use predictor::{predict_total, MultiplierModel, TotalPredictor, PREDICTOR_BASE_RATE};
pub use quantities::{estimate_quantities, PerSqftFactors};
