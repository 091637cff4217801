//! Error types for background scans

use hypotest_stats::StatsError;
use thiserror::Error;

/// Errors that can occur while running or awaiting a scan
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The result channel was closed
    #[error("Scan worker closed")]
    Closed,

    /// No result arrived within the configured timeout
    #[error("Scan {generation} timed out after {timeout_ms}ms")]
    Timeout {
        /// Generation being awaited
        generation: u64,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// A newer request replaced this one before it finished
    #[error("Scan {generation} superseded by scan {latest}")]
    Superseded {
        /// Generation being awaited
        generation: u64,
        /// Generation that replaced it
        latest: u64,
    },

    /// The scan rejected its parameters
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
