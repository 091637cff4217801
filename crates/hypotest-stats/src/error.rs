//! Statistics error types

use thiserror::Error;

/// Errors raised by the statistical primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// A parameter lies outside its mathematical domain
    #[error("Domain error: {parameter} = {value} (expected {expected})")]
    Domain {
        /// Parameter name
        parameter: &'static str,
        /// Offending value
        value: f64,
        /// Description of the valid range
        expected: &'static str,
    },

    /// The distribution library rejected its parameters
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl StatsError {
    pub(crate) fn domain(parameter: &'static str, value: f64, expected: &'static str) -> Self {
        StatsError::Domain {
            parameter,
            value,
            expected,
        }
    }
}
