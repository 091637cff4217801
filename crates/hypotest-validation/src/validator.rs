//! Input validation logic

use crate::forms::{BinomialForm, CorrelationForm, FieldSpec, Form, NormalForm};
use crate::{TiePolicy, ValidationConfig};
use hypotest_domain::{
    BinomialParameters, CorrelationParameters, Field, Inequality, NormalParameters,
    TestParameters,
};
use std::fmt;
use tracing::debug;

/// Result of validating a form
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether every field passed validation
    pub status: ValidationStatus,

    /// Per-field outcome, in form display order
    pub fields: Vec<FieldReport>,

    /// Alternative hypothesis of the form
    pub inequality: Inequality,

    /// Typed parameters, present only when the form was accepted
    pub parameters: Option<TestParameters>,
}

impl ValidationResult {
    /// Whether the form can be evaluated
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Report for one field by name
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.name == name)
    }

    /// Fields that failed validation
    pub fn rejected(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|report| report.reason.is_some())
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Every field is valid
    Accepted,

    /// At least one field is invalid
    Rejected,
}

/// Outcome for one input field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    /// Field name
    pub name: &'static str,
    /// Field label
    pub label: &'static str,
    /// Raw text with its parsed value and validity
    pub field: Field,
    /// Why the field is invalid, if it is
    pub reason: Option<RejectionReason>,
}

/// Reasons a field is invalid
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Text is empty or not a finite number
    NotANumber,

    /// Value is a number outside the allowed range
    OutOfRange {
        /// Description of the allowed range
        expected: String,
    },

    /// Value must be a whole number
    NotAnInteger,

    /// Field cannot be checked because another field is invalid
    DependsOnInvalid {
        /// Name of the field this one depends on
        field: &'static str,
    },

    /// Binomial sample value equals n⋅p, leaving the two-tailed test undefined
    TieWithExpected {
        /// The expected value n⋅p
        expected_value: f64,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotANumber => write!(f, "not a number"),
            RejectionReason::OutOfRange { expected } => write!(f, "expected {}", expected),
            RejectionReason::NotAnInteger => write!(f, "expected a whole number"),
            RejectionReason::DependsOnInvalid { field } => {
                write!(f, "cannot be checked while {} is invalid", field)
            }
            RejectionReason::TieWithExpected { expected_value } => write!(
                f,
                "equals the expected value {}, so no tail can be chosen",
                expected_value
            ),
        }
    }
}

/// One field moving through its checks; the first failed check sticks
struct Check {
    field: Field,
    reason: Option<RejectionReason>,
}

impl Check {
    fn number(raw: &str) -> Self {
        let field = Field::parse(raw);
        let reason = (!field.valid).then_some(RejectionReason::NotANumber);
        Self { field, reason }
    }

    fn blocked(raw: &str, on: &'static str) -> Self {
        Self {
            field: Field::parse(raw).invalidate(),
            reason: Some(RejectionReason::DependsOnInvalid { field: on }),
        }
    }

    fn require(
        self,
        rule: impl FnOnce(f64) -> bool,
        reason: impl FnOnce() -> RejectionReason,
    ) -> Self {
        if self.reason.is_some() {
            return self;
        }
        let field = self.field.check(rule);
        let reason = (!field.valid).then(reason);
        Self { field, reason }
    }

    fn in_range(self, rule: impl FnOnce(f64) -> bool, expected: &str) -> Self {
        self.require(rule, || RejectionReason::OutOfRange {
            expected: expected.to_string(),
        })
    }

    fn integer(self) -> Self {
        self.require(|v| v.fract() == 0.0, || RejectionReason::NotAnInteger)
    }

    /// Whole number from `lowest` up to what a count can hold
    fn count(self, lowest: f64, expected: &str) -> Self {
        self.integer()
            .in_range(|v| (lowest..=MAX_COUNT).contains(&v), expected)
    }

    fn probability(self, expected: &str) -> Self {
        self.in_range(|v| v > 0.0 && v < 1.0, expected)
    }

    fn report(self, spec: &FieldSpec) -> FieldReport {
        FieldReport {
            name: spec.name,
            label: spec.label,
            field: self.field,
            reason: self.reason,
        }
    }
}

const MAX_COUNT: f64 = u64::MAX as f64;

const SIGNIFICANCE_RANGE: &str = "a significance level strictly between 0 and 1";

/// Validates raw forms into typed test parameters
///
/// Validation never fails as a call: invalid input is reported per field in
/// the returned [`ValidationResult`], and no parameters are produced unless
/// every field is valid.
#[derive(Debug, Clone)]
pub struct InputValidator {
    config: ValidationConfig,
}

impl InputValidator {
    /// Create a new validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a form of any family
    pub fn validate(&self, form: &Form) -> ValidationResult {
        let result = match form {
            Form::Binomial(f) => self.validate_binomial(f),
            Form::Normal(f) => self.validate_normal(f),
            Form::Correlation(f) => self.validate_correlation(f),
        };

        debug!(
            family = form.family().as_str(),
            rejected = result.rejected().count(),
            "Validated form"
        );
        result
    }

    /// Validate binomial inputs
    ///
    /// The sample value depends on the sample size (its upper bound) and on
    /// the test value (the n⋅p tie check).
    pub fn validate_binomial(&self, form: &BinomialForm) -> ValidationResult {
        let [p_spec, alpha_spec, n_spec, x_spec] = &BinomialForm::FIELDS;
        let max = self.config.max_binomial_sample_size;

        let test_value = Check::number(&form.test_value)
            .probability("a proportion strictly between 0 and 1");
        let significance = Check::number(&form.significance_level).probability(SIGNIFICANCE_RANGE);
        let sample_size = Check::number(&form.sample_size)
            .count(1.0, "a positive integer")
            .in_range(|v| v <= max as f64, &format!("at most {}", max));

        let sample_value = match sample_size.field.value() {
            None => Check::blocked(&form.sample_value, n_spec.name),
            Some(n) => {
                let lowest = if self.config.allow_zero_sample_value { 0.0 } else { 1.0 };
                let check = Check::number(&form.sample_value)
                    .integer()
                    .in_range(
                        |v| v >= lowest && v <= n,
                        &format!("a whole number from {} to {}", lowest, n),
                    );

                match (self.config.tie_policy, test_value.field.value()) {
                    (TiePolicy::Reject, Some(p)) => {
                        let expected_value = n * p;
                        check.require(
                            |x| x != expected_value,
                            || RejectionReason::TieWithExpected { expected_value },
                        )
                    }
                    _ => check,
                }
            }
        };

        let parameters = match (
            test_value.field.value(),
            significance.field.value(),
            sample_size.field.as_count(),
            sample_value.field.as_count(),
        ) {
            (Some(test_value), Some(significance_level), Some(sample_size), Some(sample_value)) => {
                Some(TestParameters::Binomial(BinomialParameters {
                    sample_size,
                    test_value,
                    sample_value,
                    significance_level,
                    inequality: form.inequality,
                }))
            }
            _ => None,
        };

        finish(
            vec![
                test_value.report(p_spec),
                significance.report(alpha_spec),
                sample_size.report(n_spec),
                sample_value.report(x_spec),
            ],
            form.inequality,
            parameters,
        )
    }

    /// Validate normal inputs
    pub fn validate_normal(&self, form: &NormalForm) -> ValidationResult {
        let [alpha_spec, n_spec, mean_spec, mu_spec, sd_spec] = &NormalForm::FIELDS;

        let significance = Check::number(&form.significance_level).probability(SIGNIFICANCE_RANGE);
        let sample_size = Check::number(&form.sample_size).count(1.0, "a positive integer");
        let sample_mean = Check::number(&form.sample_mean);
        let distribution_mean = Check::number(&form.distribution_mean);
        let std_dev = Check::number(&form.distribution_std_dev)
            .in_range(|v| v > 0.0, "a positive standard deviation");

        let parameters = match (
            distribution_mean.field.value(),
            std_dev.field.value(),
            sample_size.field.as_count(),
            sample_mean.field.value(),
            significance.field.value(),
        ) {
            (
                Some(distribution_mean),
                Some(distribution_std_dev),
                Some(sample_size),
                Some(sample_mean),
                Some(significance_level),
            ) => Some(TestParameters::Normal(NormalParameters {
                distribution_mean,
                distribution_std_dev,
                sample_size,
                sample_mean,
                significance_level,
                inequality: form.inequality,
            })),
            _ => None,
        };

        finish(
            vec![
                significance.report(alpha_spec),
                sample_size.report(n_spec),
                sample_mean.report(mean_spec),
                distribution_mean.report(mu_spec),
                std_dev.report(sd_spec),
            ],
            form.inequality,
            parameters,
        )
    }

    /// Validate correlation inputs
    pub fn validate_correlation(&self, form: &CorrelationForm) -> ValidationResult {
        let [alpha_spec, n_spec, r_spec] = &CorrelationForm::FIELDS;

        let significance = Check::number(&form.significance_level).probability(SIGNIFICANCE_RANGE);
        let sample_size =
            Check::number(&form.sample_size).count(3.0, "an integer of at least 3");
        let pmcc = Check::number(&form.sample_pmcc)
            .in_range(|v| v > -1.0 && v < 1.0, "a coefficient strictly between -1 and 1");

        let parameters = match (
            sample_size.field.as_count(),
            pmcc.field.value(),
            significance.field.value(),
        ) {
            (Some(sample_size), Some(sample_pmcc), Some(significance_level)) => {
                Some(TestParameters::Correlation(CorrelationParameters {
                    sample_size,
                    sample_pmcc,
                    significance_level,
                    inequality: form.inequality,
                }))
            }
            _ => None,
        };

        finish(
            vec![
                significance.report(alpha_spec),
                sample_size.report(n_spec),
                pmcc.report(r_spec),
            ],
            form.inequality,
            parameters,
        )
    }
}

fn finish(
    fields: Vec<FieldReport>,
    inequality: Inequality,
    parameters: Option<TestParameters>,
) -> ValidationResult {
    let accepted = fields.iter().all(|report| report.reason.is_none());
    let status = if accepted {
        ValidationStatus::Accepted
    } else {
        ValidationStatus::Rejected
    };

    ValidationResult {
        status,
        fields,
        inequality,
        parameters: if accepted { parameters } else { None },
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use hypotest_domain::TestFamily;
    use proptest::prelude::*;

    proptest! {
        /// Property: accepted forms always carry parameters and rejected
        /// forms never do
        #[test]
        fn test_parameters_iff_accepted(
            n in "[0-9]{1,3}",
            x in "-?[0-9]{1,3}(\\.5)?",
            p in "0\\.[0-9]{1,2}",
        ) {
            let mut form = Form::new(TestFamily::Binomial);
            form.set("sample-size", &n).unwrap();
            form.set("sample-value", &x).unwrap();
            form.set("test-value", &p).unwrap();

            let result = InputValidator::default_config().validate(&form);
            prop_assert_eq!(result.is_accepted(), result.parameters.is_some());
            prop_assert_eq!(result.is_accepted(), result.rejected().count() == 0);
        }

        /// Property: sample sizes of any magnitude keep status and
        /// parameters in step for every family
        #[test]
        fn test_sample_size_magnitudes(n in "[0-9]{1,2}(e[0-9]{1,2})?") {
            let validator = InputValidator::default_config();
            for family in TestFamily::ALL {
                let mut form = Form::new(family);
                form.set("sample-size", &n).unwrap();

                let result = validator.validate(&form);
                prop_assert_eq!(result.is_accepted(), result.parameters.is_some());
                prop_assert_eq!(result.is_accepted(), result.rejected().count() == 0);
                for report in &result.fields {
                    prop_assert_eq!(report.field.valid, report.reason.is_none());
                }
            }
        }

        /// Property: any text is accepted by the form and validated without panicking
        #[test]
        fn test_arbitrary_text(raw in ".*") {
            let mut form = Form::new(TestFamily::Correlation);
            form.set("pmcc", &raw).unwrap();
            let result = InputValidator::default_config().validate(&form);
            let report = result.field("pmcc").unwrap();
            prop_assert_eq!(report.field.valid, report.reason.is_none());
        }
    }
}
