//! Raw input forms
//!
//! A form holds exactly what the user typed, one string per numeric input,
//! plus the chosen alternative hypothesis. Defaults reproduce a worked
//! textbook example for each family.

use crate::ValidationError;
use hypotest_domain::{Inequality, TestFamily};

/// Static description of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used to address the field (`set <name> <value>`)
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
}

const fn spec(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label }
}

/// Binomial test inputs
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialForm {
    /// Proportion p under H₀
    pub test_value: String,
    /// Significance level α
    pub significance_level: String,
    /// Number of trials n
    pub sample_size: String,
    /// Observed successes x
    pub sample_value: String,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl BinomialForm {
    /// Fields in display order
    pub const FIELDS: [FieldSpec; 4] = [
        spec("test-value", "Test value"),
        spec("significance", "Significance level"),
        spec("sample-size", "Sample size"),
        spec("sample-value", "Sample value"),
    ];
}

impl Default for BinomialForm {
    fn default() -> Self {
        Self {
            test_value: "0.35".to_string(),
            significance_level: "0.05".to_string(),
            sample_size: "40".to_string(),
            sample_value: "19".to_string(),
            inequality: Inequality::Greater,
        }
    }
}

/// Normal test inputs
#[derive(Debug, Clone, PartialEq)]
pub struct NormalForm {
    /// Population mean μ under H₀
    pub distribution_mean: String,
    /// Population standard deviation σ
    pub distribution_std_dev: String,
    /// Sample size n
    pub sample_size: String,
    /// Observed sample mean
    pub sample_mean: String,
    /// Significance level α
    pub significance_level: String,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl NormalForm {
    /// Fields in display order
    pub const FIELDS: [FieldSpec; 5] = [
        spec("significance", "Significance level"),
        spec("sample-size", "Sample size"),
        spec("sample-mean", "Sample mean"),
        spec("mean", "Distribution mean"),
        spec("std-dev", "Standard deviation"),
    ];
}

impl Default for NormalForm {
    fn default() -> Self {
        Self {
            distribution_mean: "10.6".to_string(),
            distribution_std_dev: "0.89442719".to_string(),
            sample_size: "50".to_string(),
            sample_mean: "10.79".to_string(),
            significance_level: "0.1".to_string(),
            inequality: Inequality::NotEqual,
        }
    }
}

/// Correlation test inputs
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationForm {
    /// Significance level α
    pub significance_level: String,
    /// Number of bivariate observations n
    pub sample_size: String,
    /// Sample correlation coefficient r
    pub sample_pmcc: String,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl CorrelationForm {
    /// Fields in display order
    pub const FIELDS: [FieldSpec; 3] = [
        spec("significance", "Significance level"),
        spec("sample-size", "Sample size"),
        spec("pmcc", "Correlation coefficient"),
    ];
}

impl Default for CorrelationForm {
    fn default() -> Self {
        Self {
            significance_level: "0.05".to_string(),
            sample_size: "50".to_string(),
            sample_pmcc: "0.3608".to_string(),
            inequality: Inequality::NotEqual,
        }
    }
}

/// Form of any family
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// Binomial inputs
    Binomial(BinomialForm),
    /// Normal inputs
    Normal(NormalForm),
    /// Correlation inputs
    Correlation(CorrelationForm),
}

/// Field name addressing the alternative hypothesis
pub const INEQUALITY_FIELD: &str = "alternative";

impl Form {
    /// Default form for a family
    pub fn new(family: TestFamily) -> Self {
        match family {
            TestFamily::Binomial => Form::Binomial(BinomialForm::default()),
            TestFamily::Normal => Form::Normal(NormalForm::default()),
            TestFamily::Correlation => Form::Correlation(CorrelationForm::default()),
        }
    }

    /// Family of the form
    pub fn family(&self) -> TestFamily {
        match self {
            Form::Binomial(_) => TestFamily::Binomial,
            Form::Normal(_) => TestFamily::Normal,
            Form::Correlation(_) => TestFamily::Correlation,
        }
    }

    /// Numeric fields of the form in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Form::Binomial(_) => &BinomialForm::FIELDS,
            Form::Normal(_) => &NormalForm::FIELDS,
            Form::Correlation(_) => &CorrelationForm::FIELDS,
        }
    }

    /// Alternative hypothesis
    pub fn inequality(&self) -> Inequality {
        match self {
            Form::Binomial(f) => f.inequality,
            Form::Normal(f) => f.inequality,
            Form::Correlation(f) => f.inequality,
        }
    }

    /// Replace the raw text of a field (or the alternative hypothesis)
    ///
    /// Any text is accepted for numeric fields; whether it is valid is decided
    /// by the validator on the next evaluation.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), ValidationError> {
        if name == INEQUALITY_FIELD {
            let inequality = Inequality::parse(raw)
                .ok_or_else(|| ValidationError::InvalidInequality(raw.to_string()))?;
            match self {
                Form::Binomial(f) => f.inequality = inequality,
                Form::Normal(f) => f.inequality = inequality,
                Form::Correlation(f) => f.inequality = inequality,
            }
            return Ok(());
        }

        let family = self.family().as_str();
        let slot = self
            .slot_mut(name)
            .ok_or_else(|| ValidationError::UnknownField {
                field: name.to_string(),
                family,
            })?;
        *slot = raw.to_string();
        Ok(())
    }

    /// Raw text of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match (self, name) {
            (Form::Binomial(f), "test-value") => &f.test_value,
            (Form::Binomial(f), "significance") => &f.significance_level,
            (Form::Binomial(f), "sample-size") => &f.sample_size,
            (Form::Binomial(f), "sample-value") => &f.sample_value,
            (Form::Normal(f), "significance") => &f.significance_level,
            (Form::Normal(f), "sample-size") => &f.sample_size,
            (Form::Normal(f), "sample-mean") => &f.sample_mean,
            (Form::Normal(f), "mean") => &f.distribution_mean,
            (Form::Normal(f), "std-dev") => &f.distribution_std_dev,
            (Form::Correlation(f), "significance") => &f.significance_level,
            (Form::Correlation(f), "sample-size") => &f.sample_size,
            (Form::Correlation(f), "pmcc") => &f.sample_pmcc,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        let slot = match (self, name) {
            (Form::Binomial(f), "test-value") => &mut f.test_value,
            (Form::Binomial(f), "significance") => &mut f.significance_level,
            (Form::Binomial(f), "sample-size") => &mut f.sample_size,
            (Form::Binomial(f), "sample-value") => &mut f.sample_value,
            (Form::Normal(f), "significance") => &mut f.significance_level,
            (Form::Normal(f), "sample-size") => &mut f.sample_size,
            (Form::Normal(f), "sample-mean") => &mut f.sample_mean,
            (Form::Normal(f), "mean") => &mut f.distribution_mean,
            (Form::Normal(f), "std-dev") => &mut f.distribution_std_dev,
            (Form::Correlation(f), "significance") => &mut f.significance_level,
            (Form::Correlation(f), "sample-size") => &mut f.sample_size,
            (Form::Correlation(f), "pmcc") => &mut f.sample_pmcc,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_family() {
        let form = Form::new(TestFamily::Binomial);
        assert_eq!(form.get("sample-size"), Some("40"));
        assert_eq!(form.inequality(), Inequality::Greater);

        let form = Form::new(TestFamily::Correlation);
        assert_eq!(form.get("pmcc"), Some("0.3608"));
        assert_eq!(form.inequality(), Inequality::NotEqual);
    }

    #[test]
    fn test_set_field() {
        let mut form = Form::new(TestFamily::Normal);
        form.set("sample-mean", "72").unwrap();
        assert_eq!(form.get("sample-mean"), Some("72"));

        // Any text is stored; validity is decided later
        form.set("std-dev", "ten").unwrap();
        assert_eq!(form.get("std-dev"), Some("ten"));
    }

    #[test]
    fn test_set_inequality() {
        let mut form = Form::new(TestFamily::Binomial);
        form.set(INEQUALITY_FIELD, "!=").unwrap();
        assert_eq!(form.inequality(), Inequality::NotEqual);

        let err = form.set(INEQUALITY_FIELD, "~").unwrap_err();
        assert_eq!(err, ValidationError::InvalidInequality("~".to_string()));
    }

    #[test]
    fn test_unknown_field() {
        let mut form = Form::new(TestFamily::Correlation);
        let err = form.set("sample-value", "3").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { family: "correlation", .. }));
    }

    #[test]
    fn test_every_listed_field_is_addressable() {
        for family in TestFamily::ALL {
            let form = Form::new(family);
            for field in form.fields() {
                assert!(form.get(field.name).is_some(), "{} missing {}", family.as_str(), field.name);
            }
        }
    }
}
