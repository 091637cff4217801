//! Hypotest Validation
//!
//! Turns raw form text into typed test parameters.
//!
//! The validator provides:
//! - Per-field parsing into `{raw, parsed, valid}` fields
//! - Range and integrality checks for each test family
//! - Dependency ordering (a sample value is only checked against a valid sample size)
//! - A configurable policy for binomial sample values equal to n⋅p
//!
//! # Examples
//!
//! ```
//! use hypotest_domain::TestFamily;
//! use hypotest_validation::{Form, InputValidator, ValidationConfig};
//!
//! let validator = InputValidator::new(ValidationConfig::default());
//! let mut form = Form::new(TestFamily::Binomial);
//! form.set("sample-value", "22").unwrap();
//!
//! let result = validator.validate(&form);
//! assert!(result.is_accepted());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod forms;
mod validator;

pub use config::{TiePolicy, ValidationConfig};
pub use error::ValidationError;
pub use forms::{BinomialForm, CorrelationForm, FieldSpec, Form, NormalForm, INEQUALITY_FIELD};
pub use validator::{
    FieldReport, InputValidator, RejectionReason, ValidationResult, ValidationStatus,
};
