//! Hypotest Worker
//!
//! Background execution of the binomial critical-value scan.
//!
//! # Overview
//!
//! The scan is the only part of a test whose cost grows with the sample size,
//! so it is the only part taken off the interactive thread. The worker is
//! responsible for:
//! - **Offloading**: large scans run on tokio's blocking pool, small ones inline
//! - **Cancellation**: a new request stops the scan in flight at its next poll
//! - **Staleness**: a generation counter keeps superseded results from ever
//!   being published
//! - **Metrics**: counting submissions, completions, cancellations and
//!   discarded results
//!
//! # Usage
//!
//! ```
//! use hypotest_domain::ScanRequest;
//! use hypotest_worker::{ScanWorker, WorkerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut worker = ScanWorker::new(WorkerConfig::default())?;
//!
//!     // Inputs changed twice in quick succession: only the second counts
//!     worker.submit(ScanRequest::new(100_000, 0.5, 0.975))?;
//!     let latest = worker.submit(ScanRequest::new(40, 0.35, 0.95))?;
//!
//!     let result = worker.wait_for(latest).await?;
//!     assert_eq!(result.boundary, 18.5);
//!     println!("{}", worker.metrics().summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [worker]
//! inline_threshold = 2000
//! cancel_check_interval = 64
//! result_timeout_ms = 30000
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod worker;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use metrics::WorkerMetrics;
pub use worker::{ScanResult, ScanTicket, ScanWorker};
