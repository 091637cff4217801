//! Hypotest Statistics
//!
//! Numerical primitives behind the hypothesis tests, built on `statrs`:
//!
//! - [`distributions`]: binomial CDF, Student's t inverse CDF, normal CDF and
//!   inverse CDF, each checking its parameter domain first
//! - [`critical_value`]: the binomial critical-boundary scan, with a
//!   cancellable variant for background execution
//! - [`correlation`]: the PMCC critical value derived from Student's t
//!
//! # Examples
//!
//! ```
//! use hypotest_domain::ScanRequest;
//! use hypotest_stats::{correlation_critical_value, scan};
//!
//! // X ~ B(40, 0.35): first count whose cumulative probability passes 0.95
//! let boundary = scan(&ScanRequest::new(40, 0.35, 0.95)).unwrap();
//! assert_eq!(boundary, 18.5);
//!
//! let cv = correlation_critical_value(50, 0.025).unwrap();
//! assert!((cv - 0.279).abs() < 1e-3);
//! ```

#![warn(missing_docs)]

pub mod correlation;
pub mod critical_value;
pub mod distributions;
mod error;

pub use correlation::correlation_critical_value;
pub use critical_value::{scan, scan_until, BinomialScan, ScanOutcome};
pub use distributions::{binomial_cdf, normal_cdf, normal_inverse_cdf, student_t_inverse_cdf};
pub use error::StatsError;
