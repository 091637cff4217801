//! Hypothesis notation shared by every renderer
//!
//! A read-only format table: nothing here is mutable process state.

/// Null hypothesis
pub const H0: &str = "H₀";

/// Alternative hypothesis
pub const H1: &str = "H₁";

/// Strictly less than
pub const LESS: &str = "<";

/// Strictly greater than
pub const GREATER: &str = ">";

/// Not equal (two-tailed)
pub const NOT_EQUAL: &str = "≠";

/// Less than or equal (lower critical region)
pub const LESS_EQUAL: &str = "≤";

/// Greater than or equal (upper critical region)
pub const GREATER_EQUAL: &str = "≥";

/// Element of (sample inside the critical region)
pub const ELEMENT_OF: &str = "∈";

/// Not an element of
pub const NOT_ELEMENT_OF: &str = "∉";

/// Implication arrow between worked steps
pub const IMPLIES: &str = "⟹";

/// Multiplication dot
pub const TIMES: &str = "⋅";

/// Significance level
pub const ALPHA: &str = "α";

/// Population proportion
pub const PROPORTION: &str = "p";

/// Population mean
pub const MEAN: &str = "μ";

/// Population correlation coefficient
pub const RHO: &str = "ρ";

/// Sample mean
pub const SAMPLE_MEAN: &str = "X̅";

/// Critical region abbreviation
pub const CRITICAL_REGION: &str = "CR";

/// Placeholder for the question's context in a conclusion sentence
pub const CONTEXT: &str = "<context>";

/// Text shown wherever a value is indeterminate
pub const UNDEFINED: &str = "undefined";
