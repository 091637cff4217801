//! Normal mean test
//!
//! Under H₀ the sample mean follows X̅ ~ N(μ, σ²/n). The tail probability of
//! the observed mean is compared with the actual significance level; the
//! critical sample mean is reported alongside so both views of the same
//! decision can be shown.

use crate::EvaluatorError;
use hypotest_domain::{
    ActualSignificanceLevel, Decision, Indeterminate, NormalParameters, Tail, TailSelection,
    Verdict,
};
use hypotest_stats::{normal_cdf, normal_inverse_cdf};
use tracing::debug;

/// Worked normal test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSolution {
    /// Validated inputs
    pub parameters: NormalParameters,
    /// α, halved for a two-tailed test
    pub significance: ActualSignificanceLevel,
    /// σ²/n
    pub sampling_variance: f64,
    /// σ/√n
    pub standard_error: f64,
    /// (x̅ - μ)/(σ/√n)
    pub z_score: f64,
    /// Tail under test
    pub selection: TailSelection,
    /// P(X̅ ≤ x̅) for the lower tail, P(X̅ ≥ x̅) for the upper (NaN when undefined)
    pub tail_probability: f64,
    /// Sample mean at which the tail probability equals the actual significance level
    pub critical_mean: f64,
    /// Outcome
    pub decision: Decision,
}

/// Evaluate a normal test
///
/// # Errors
///
/// `InvalidParameters` when n = 0, `Stats` when σ ≤ 0.
pub fn evaluate(parameters: &NormalParameters) -> Result<NormalSolution, EvaluatorError> {
    if parameters.sample_size == 0 {
        return Err(EvaluatorError::InvalidParameters(
            "sample size must be positive".to_string(),
        ));
    }

    let significance = parameters.actual_significance();
    let mean = parameters.distribution_mean;
    let variance = parameters.sampling_variance();
    let standard_error = parameters.standard_error();

    let selection = match parameters.inequality.tail() {
        Some(tail) => TailSelection::fixed(tail, mean, parameters.sample_mean),
        None => TailSelection::compare(mean, parameters.sample_mean),
    };

    let mut solution = NormalSolution {
        parameters: *parameters,
        significance,
        sampling_variance: variance,
        standard_error,
        z_score: (parameters.sample_mean - mean) / standard_error,
        selection,
        tail_probability: f64::NAN,
        critical_mean: f64::NAN,
        decision: Decision::Indeterminate(Indeterminate::UndefinedValue),
    };

    let tail = match selection.require() {
        Ok(tail) => tail,
        Err(reason) => {
            debug!(%reason, "Normal tail undefined");
            solution.decision = reason.into();
            return Ok(solution);
        }
    };

    let cumulative = normal_cdf(parameters.sample_mean, mean, variance)?;
    solution.tail_probability = match tail {
        Tail::Lower => cumulative,
        Tail::Upper => 1.0 - cumulative,
    };
    solution.critical_mean =
        normal_inverse_cdf(significance.cumulative_target(tail), mean, variance)?;

    let in_region = solution.tail_probability < significance.value;
    solution.decision = Decision::Decided(Verdict::new(tail, in_region));

    debug!(
        tail = tail.as_str(),
        probability = solution.tail_probability,
        alpha = significance.value,
        "Evaluated normal test"
    );
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypotest_domain::Inequality;

    fn params(sample_mean: f64, inequality: Inequality) -> NormalParameters {
        NormalParameters {
            distribution_mean: 65.0,
            distribution_std_dev: 10.0,
            sample_size: 8,
            sample_mean,
            significance_level: 0.05,
            inequality,
        }
    }

    #[test]
    fn test_upper_tail_rejected() {
        let solution = evaluate(&params(72.0, Inequality::Greater)).unwrap();

        assert_eq!(solution.sampling_variance, 12.5);
        assert!((solution.tail_probability - 0.023857).abs() < 1e-5);
        assert!((solution.critical_mean - 70.8154).abs() < 1e-3);
        assert!((solution.z_score - 1.979899).abs() < 1e-5);
        assert_eq!(solution.decision.reject_null(), Some(true));
    }

    #[test]
    fn test_lower_tail_uses_cdf() {
        let solution = evaluate(&params(60.0, Inequality::Less)).unwrap();

        assert!((solution.tail_probability - 0.078650).abs() < 1e-5);
        assert!(solution.critical_mean < 65.0);
        assert_eq!(solution.decision.reject_null(), Some(false));
    }

    #[test]
    fn test_lower_tail_rejected_far_below() {
        let solution = evaluate(&params(55.0, Inequality::Less)).unwrap();
        assert!(solution.tail_probability < 0.05);
        assert_eq!(solution.decision.reject_null(), Some(true));
    }

    #[test]
    fn test_one_tailed_wrong_side_not_rejected() {
        // x̅ above μ can never support H₁: μ < 65
        let solution = evaluate(&params(72.0, Inequality::Less)).unwrap();
        assert!(solution.tail_probability > 0.5);
        assert_eq!(solution.decision.reject_null(), Some(false));
    }

    #[test]
    fn test_two_tailed_tie_is_indeterminate() {
        let solution = evaluate(&params(65.0, Inequality::NotEqual)).unwrap();
        assert_eq!(
            solution.decision,
            Decision::Indeterminate(Indeterminate::TailTie)
        );
        assert!(solution.tail_probability.is_nan());
        assert!(solution.critical_mean.is_nan());
    }

    #[test]
    fn test_default_form_scenario() {
        // μ = 10.6, σ² = 0.8, n = 50, x̅ = 10.79, α = 0.1 two-tailed
        let solution = evaluate(&NormalParameters {
            distribution_mean: 10.6,
            distribution_std_dev: 0.8_f64.sqrt(),
            sample_size: 50,
            sample_mean: 10.79,
            significance_level: 0.1,
            inequality: Inequality::NotEqual,
        })
        .unwrap();

        assert_eq!(solution.selection.tail, Some(Tail::Upper));
        assert!((solution.significance.value - 0.05).abs() < 1e-12);
        assert!((solution.tail_probability - 0.06654).abs() < 1e-4);
        assert_eq!(solution.decision.reject_null(), Some(false));
    }

    #[test]
    fn test_degenerate_distribution_is_error() {
        let mut parameters = params(72.0, Inequality::Greater);
        parameters.distribution_std_dev = 0.0;
        assert!(matches!(evaluate(&parameters), Err(EvaluatorError::Stats(_))));

        parameters.sample_size = 0;
        assert!(matches!(
            evaluate(&parameters),
            Err(EvaluatorError::InvalidParameters(_))
        ));
    }
}
