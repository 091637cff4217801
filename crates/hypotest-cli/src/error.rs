//! Error types for the CLI application.

use hypotest_evaluator::EvaluatorError;
use hypotest_validation::ValidationError;
use hypotest_worker::WorkerError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form editing error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Evaluation error
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    /// Background scan error
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
