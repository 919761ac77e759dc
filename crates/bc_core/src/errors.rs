//! Error taxonomy shared by every computational component.

use core::fmt;

/// Failure kinds of the estimation core. All components fail fast with one
/// of these; none of them retries or returns partial results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EstimateError {
    /// Malformed or out-of-range `FeatureSet` field. The request is rejected.
    InvalidInput(String),
    /// Pricing table is missing a required key or carries an unusable value.
    Configuration(String),
    /// Nonsensical engine setting (e.g. an inflation rate at or below -100%).
    InvalidConfiguration(String),
}

impl EstimateError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EstimateError::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        EstimateError::Configuration(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        EstimateError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::InvalidInput(m) => write!(f, "invalid input: {m}"),
            EstimateError::Configuration(m) => write!(f, "configuration error: {m}"),
            EstimateError::InvalidConfiguration(m) => write!(f, "invalid configuration: {m}"),
        }
    }
}

impl std::error::Error for EstimateError {}
