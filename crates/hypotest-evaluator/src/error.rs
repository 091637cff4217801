//! Evaluator error types

use hypotest_stats::StatsError;
use thiserror::Error;

/// Errors that can occur while evaluating a test
///
/// Indeterminate outcomes (ties, exhausted scans) are not errors; they are
/// reported in the solution's [`hypotest_domain::Decision`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    /// A statistical primitive rejected its parameters
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Parameters that validation should have rejected
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
