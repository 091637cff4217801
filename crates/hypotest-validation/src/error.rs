//! Validation error types

use thiserror::Error;

/// Errors that can occur while configuring or editing forms
///
/// An invalid *input* is not an error: it is reported per field in a
/// [`crate::ValidationResult`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The form has no field with this name
    #[error("Unknown field '{field}' for {family} test")]
    UnknownField {
        /// Requested field name
        field: String,
        /// Test family of the form
        family: &'static str,
    },

    /// The alternative hypothesis could not be parsed
    #[error("Invalid inequality '{0}' (expected <, > or !=)")]
    InvalidInequality(String),
}
