//! Hypotest Domain Layer
//!
//! This crate contains the value objects shared by every layer of the
//! hypothesis-test calculator. It has ZERO external dependencies and defines
//! the vocabulary the statistics, validation, evaluation and presentation
//! crates speak.
//!
//! ## Key Concepts
//!
//! - **Test parameters**: the validated numeric inputs for a binomial, normal
//!   or correlation (PMCC) test
//! - **Inequality**: the alternative hypothesis (`<`, `>`, `≠`)
//! - **Actual significance level**: α, halved for a two-tailed test
//! - **Decision**: a [`Verdict`] or an explicit indeterminate outcome
//! - **Field**: raw text, parsed value and validity of a single input
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure value objects, recomputed on every evaluation
//! - Trait definitions for the seams other crates implement

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod inequality;
pub mod parameters;
pub mod significance;
pub mod symbols;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use field::Field;
pub use inequality::{Inequality, Tail};
pub use parameters::{
    BinomialParameters, CorrelationParameters, NormalParameters, TestFamily, TestParameters,
};
pub use significance::ActualSignificanceLevel;
pub use traits::{BoundarySearch, ScanRequest};
pub use verdict::{Decision, Indeterminate, TailSelection, Verdict};
