//! Test parameters module
//!
//! One parameter struct per test family. Values are transient: they are
//! rebuilt from the input fields on every evaluation and never mutated.

use crate::{ActualSignificanceLevel, Inequality};

/// Family of hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestFamily {
    /// Binomial proportion test, X ~ B(n, p)
    Binomial,

    /// Normal mean test, X̅ ~ N(μ, σ²/n)
    Normal,

    /// Pearson product-moment correlation test
    Correlation,
}

impl TestFamily {
    /// All families in presentation order
    pub const ALL: [TestFamily; 3] = [
        TestFamily::Binomial,
        TestFamily::Normal,
        TestFamily::Correlation,
    ];

    /// Family name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TestFamily::Binomial => "binomial",
            TestFamily::Normal => "normal",
            TestFamily::Correlation => "correlation",
        }
    }

    /// Parse a family from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "binomial" | "binom" | "b" => Some(TestFamily::Binomial),
            "normal" | "norm" | "n" => Some(TestFamily::Normal),
            "correlation" | "pmcc" | "corr" | "c" => Some(TestFamily::Correlation),
            _ => None,
        }
    }
}

impl std::str::FromStr for TestFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid test family: {}", s))
    }
}

/// Parameters of a binomial proportion test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialParameters {
    /// Number of trials n
    pub sample_size: u64,
    /// Proportion p under H₀
    pub test_value: f64,
    /// Observed number of successes x
    pub sample_value: u64,
    /// Significance level α
    pub significance_level: f64,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl BinomialParameters {
    /// Expected count under H₀ (n⋅p)
    pub fn expected_value(&self) -> f64 {
        self.sample_size as f64 * self.test_value
    }

    /// Significance level applied to the relevant tail
    pub fn actual_significance(&self) -> ActualSignificanceLevel {
        ActualSignificanceLevel::new(self.significance_level, self.inequality)
    }
}

/// Parameters of a normal mean test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalParameters {
    /// Population mean μ under H₀
    pub distribution_mean: f64,
    /// Population standard deviation σ
    pub distribution_std_dev: f64,
    /// Sample size n
    pub sample_size: u64,
    /// Observed sample mean x̅
    pub sample_mean: f64,
    /// Significance level α
    pub significance_level: f64,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl NormalParameters {
    /// Population variance σ²
    pub fn population_variance(&self) -> f64 {
        self.distribution_std_dev * self.distribution_std_dev
    }

    /// Variance of the sample mean, σ²/n
    pub fn sampling_variance(&self) -> f64 {
        self.population_variance() / self.sample_size as f64
    }

    /// Standard error of the sample mean, σ/√n
    pub fn standard_error(&self) -> f64 {
        self.sampling_variance().sqrt()
    }

    /// Significance level applied to the relevant tail
    pub fn actual_significance(&self) -> ActualSignificanceLevel {
        ActualSignificanceLevel::new(self.significance_level, self.inequality)
    }
}

/// Parameters of a correlation (PMCC) test against ρ = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationParameters {
    /// Number of bivariate observations n
    pub sample_size: u64,
    /// Sample product-moment correlation coefficient r
    pub sample_pmcc: f64,
    /// Significance level α
    pub significance_level: f64,
    /// Alternative hypothesis
    pub inequality: Inequality,
}

impl CorrelationParameters {
    /// Degrees of freedom n - 2, None when not positive
    pub fn degrees_of_freedom(&self) -> Option<u64> {
        self.sample_size.checked_sub(2).filter(|df| *df > 0)
    }

    /// Significance level applied to the relevant tail
    pub fn actual_significance(&self) -> ActualSignificanceLevel {
        ActualSignificanceLevel::new(self.significance_level, self.inequality)
    }
}

/// Parameters of any supported test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestParameters {
    /// Binomial proportion test
    Binomial(BinomialParameters),
    /// Normal mean test
    Normal(NormalParameters),
    /// Correlation test
    Correlation(CorrelationParameters),
}

impl TestParameters {
    /// Family of the test
    pub fn family(&self) -> TestFamily {
        match self {
            TestParameters::Binomial(_) => TestFamily::Binomial,
            TestParameters::Normal(_) => TestFamily::Normal,
            TestParameters::Correlation(_) => TestFamily::Correlation,
        }
    }

    /// Alternative hypothesis
    pub fn inequality(&self) -> Inequality {
        match self {
            TestParameters::Binomial(p) => p.inequality,
            TestParameters::Normal(p) => p.inequality,
            TestParameters::Correlation(p) => p.inequality,
        }
    }

    /// Significance level applied to the relevant tail
    pub fn actual_significance(&self) -> ActualSignificanceLevel {
        match self {
            TestParameters::Binomial(p) => p.actual_significance(),
            TestParameters::Normal(p) => p.actual_significance(),
            TestParameters::Correlation(p) => p.actual_significance(),
        }
    }
}

impl From<BinomialParameters> for TestParameters {
    fn from(params: BinomialParameters) -> Self {
        TestParameters::Binomial(params)
    }
}

impl From<NormalParameters> for TestParameters {
    fn from(params: NormalParameters) -> Self {
        TestParameters::Normal(params)
    }
}

impl From<CorrelationParameters> for TestParameters {
    fn from(params: CorrelationParameters) -> Self {
        TestParameters::Correlation(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_expected_value() {
        let params = BinomialParameters {
            sample_size: 40,
            test_value: 0.35,
            sample_value: 19,
            significance_level: 0.05,
            inequality: Inequality::Greater,
        };
        assert!((params.expected_value() - 14.0).abs() < 1e-12);
        assert_eq!(params.actual_significance().value, 0.05);
    }

    #[test]
    fn test_normal_sampling_variance() {
        let params = NormalParameters {
            distribution_mean: 65.0,
            distribution_std_dev: 10.0,
            sample_size: 8,
            sample_mean: 72.0,
            significance_level: 0.05,
            inequality: Inequality::Greater,
        };
        assert_eq!(params.population_variance(), 100.0);
        assert_eq!(params.sampling_variance(), 12.5);
        assert!((params.standard_error() - 12.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_degrees_of_freedom() {
        let mut params = CorrelationParameters {
            sample_size: 50,
            sample_pmcc: 0.3608,
            significance_level: 0.05,
            inequality: Inequality::NotEqual,
        };
        assert_eq!(params.degrees_of_freedom(), Some(48));

        params.sample_size = 2;
        assert_eq!(params.degrees_of_freedom(), None);

        params.sample_size = 1;
        assert_eq!(params.degrees_of_freedom(), None);
    }

    #[test]
    fn test_family_parse() {
        assert_eq!(TestFamily::parse("PMCC"), Some(TestFamily::Correlation));
        assert_eq!(TestFamily::parse("binomial"), Some(TestFamily::Binomial));
        assert_eq!("norm".parse::<TestFamily>(), Ok(TestFamily::Normal));
        assert!(TestFamily::parse("poisson").is_none());
    }

    #[test]
    fn test_dispatch_accessors() {
        let params: TestParameters = CorrelationParameters {
            sample_size: 50,
            sample_pmcc: 0.3608,
            significance_level: 0.05,
            inequality: Inequality::NotEqual,
        }
        .into();
        assert_eq!(params.family(), TestFamily::Correlation);
        assert_eq!(params.inequality(), Inequality::NotEqual);
        assert_eq!(params.actual_significance().value, 0.025);
    }
}
