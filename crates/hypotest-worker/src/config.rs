//! Configuration for background scans

use crate::WorkerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scan worker
///
/// # Examples
///
/// ```
/// use hypotest_worker::WorkerConfig;
///
/// let config = WorkerConfig::default();
/// assert_eq!(config.inline_threshold, 2_000);
///
/// // Every scan off the calling thread, cancellation checked every step
/// let config = WorkerConfig::responsive();
/// assert_eq!(config.inline_threshold, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Sample sizes at or below this run inline on the submitting thread
    /// Default: 2000
    #[serde(default = "default_inline_threshold")]
    pub inline_threshold: u64,

    /// Scan steps between two checks of the cancellation flag
    /// Default: 64
    #[serde(default = "default_cancel_check_interval")]
    pub cancel_check_interval: u64,

    /// How long to wait for a result before giving up (in milliseconds)
    /// Default: 30 seconds
    #[serde(default = "default_result_timeout_ms")]
    pub result_timeout_ms: u64,
}

fn default_inline_threshold() -> u64 {
    2_000
}

fn default_cancel_check_interval() -> u64 {
    64
}

fn default_result_timeout_ms() -> u64 {
    30_000
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            inline_threshold: default_inline_threshold(),
            cancel_check_interval: default_cancel_check_interval(),
            result_timeout_ms: default_result_timeout_ms(),
        }
    }
}

impl WorkerConfig {
    /// Responsive configuration: never scan inline, poll cancellation every step
    pub fn responsive() -> Self {
        Self {
            inline_threshold: 0,
            cancel_check_interval: 1,
            result_timeout_ms: 10_000,
        }
    }

    /// Lenient configuration: scan most samples inline and wait longer
    pub fn lenient() -> Self {
        Self {
            inline_threshold: 20_000,
            cancel_check_interval: 1_024,
            result_timeout_ms: 120_000,
        }
    }

    /// Get the result timeout as Duration
    pub fn result_timeout(&self) -> Duration {
        Duration::from_millis(self.result_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.cancel_check_interval == 0 {
            return Err(WorkerError::Config(
                "cancel_check_interval must be greater than 0".to_string(),
            ));
        }
        if self.result_timeout_ms == 0 {
            return Err(WorkerError::Config(
                "result_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
