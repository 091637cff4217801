//! Hypotest Evaluator
//!
//! Decides hypothesis tests and exposes every intermediate value of the
//! worked solution.
//!
//! Each family has its own module:
//! - [`binomial`]: critical region from a boundary search over B(n, p)
//! - [`normal`]: tail probability of the sample mean under N(μ, σ²/n)
//! - [`correlation`]: PMCC critical value from Student's t
//!
//! A two-tailed test first picks the tail from the side of the null value the
//! sample statistic falls on, then runs as a one-tailed test at half the
//! significance level. A statistic equal to the null value leaves the tail
//! undefined and the decision indeterminate.
//!
//! # Examples
//!
//! ```
//! use hypotest_domain::{BinomialParameters, Inequality, TestParameters};
//! use hypotest_evaluator::HypothesisEvaluator;
//!
//! let evaluator = HypothesisEvaluator::new();
//! let params = TestParameters::Binomial(BinomialParameters {
//!     sample_size: 40,
//!     test_value: 0.35,
//!     sample_value: 19,
//!     significance_level: 0.05,
//!     inequality: Inequality::Greater,
//! });
//!
//! let solution = evaluator.evaluate(&params).unwrap();
//! assert_eq!(solution.decision().reject_null(), Some(false));
//! ```

#![warn(missing_docs)]

pub mod binomial;
pub mod correlation;
mod error;
pub mod normal;

pub use binomial::{BinomialPlan, BinomialSolution, CriticalRegion};
pub use correlation::CorrelationSolution;
pub use error::EvaluatorError;
pub use normal::NormalSolution;

use hypotest_domain::{
    symbols, ActualSignificanceLevel, BoundarySearch, Decision, Inequality, TestFamily,
    TestParameters,
};
use hypotest_stats::BinomialScan;

/// Worked solution of any family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    /// Binomial proportion test
    Binomial(BinomialSolution),
    /// Normal mean test
    Normal(NormalSolution),
    /// Correlation test
    Correlation(CorrelationSolution),
}

impl Solution {
    /// Test family
    pub fn family(&self) -> TestFamily {
        match self {
            Solution::Binomial(_) => TestFamily::Binomial,
            Solution::Normal(_) => TestFamily::Normal,
            Solution::Correlation(_) => TestFamily::Correlation,
        }
    }

    /// Outcome of the test
    pub fn decision(&self) -> Decision {
        match self {
            Solution::Binomial(s) => s.decision,
            Solution::Normal(s) => s.decision,
            Solution::Correlation(s) => s.decision,
        }
    }

    /// Actual significance level used
    pub fn significance(&self) -> ActualSignificanceLevel {
        match self {
            Solution::Binomial(s) => s.significance,
            Solution::Normal(s) => s.significance,
            Solution::Correlation(s) => s.significance,
        }
    }

    /// Alternative hypothesis
    pub fn inequality(&self) -> Inequality {
        match self {
            Solution::Binomial(s) => s.parameters.inequality,
            Solution::Normal(s) => s.parameters.inequality,
            Solution::Correlation(s) => s.parameters.inequality,
        }
    }

    /// Null and alternative hypotheses, e.g. `("H₀: p = 0.35", "H₁: p > 0.35")`
    pub fn hypotheses(&self) -> (String, String) {
        let (parameter, value) = match self {
            Solution::Binomial(s) => (symbols::PROPORTION, s.parameters.test_value),
            Solution::Normal(s) => (symbols::MEAN, s.parameters.distribution_mean),
            Solution::Correlation(_) => (symbols::RHO, 0.0),
        };
        (
            format!("{}: {} = {}", symbols::H0, parameter, value),
            format!(
                "{}: {} {} {}",
                symbols::H1,
                parameter,
                self.inequality().symbol(),
                value
            ),
        )
    }
}

/// Dispatches validated parameters to the family evaluators
///
/// The binomial boundary search is pluggable; the default scans
/// synchronously on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct HypothesisEvaluator<S = BinomialScan> {
    search: S,
}

impl HypothesisEvaluator {
    /// Create an evaluator with the synchronous binomial scan
    pub fn new() -> Self {
        Self::with_search(BinomialScan)
    }
}

impl<S: BoundarySearch> HypothesisEvaluator<S> {
    /// Create an evaluator with a custom boundary search
    pub fn with_search(search: S) -> Self {
        Self { search }
    }

    /// Evaluate a test
    ///
    /// # Errors
    ///
    /// Only parameters that validation would have rejected produce errors;
    /// undefined outcomes are reported in the solution's decision.
    pub fn evaluate(&self, parameters: &TestParameters) -> Result<Solution, EvaluatorError> {
        let solution = match parameters {
            TestParameters::Binomial(p) => {
                Solution::Binomial(binomial::evaluate_with(p, &self.search))
            }
            TestParameters::Normal(p) => Solution::Normal(normal::evaluate(p)?),
            TestParameters::Correlation(p) => Solution::Correlation(correlation::evaluate(p)?),
        };
        Ok(solution)
    }
}
