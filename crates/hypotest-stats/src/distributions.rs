//! Distribution primitives
//!
//! Thin, domain-checked wrappers over `statrs`. Every function validates its
//! parameters before touching the distribution and fails with
//! [`StatsError::Domain`] otherwise.

use crate::StatsError;
use statrs::distribution::{Binomial, ContinuousCDF, DiscreteCDF, Normal, StudentsT};

/// Decimal places kept by the binomial CDF
///
/// Rounding to 1e-10 lets cumulative probabilities that are exact decimals
/// compare equal to a target entered as text.
pub const CDF_DECIMALS: i32 = 10;

/// Cumulative probability P(X ≤ k) for X ~ B(n, p)
///
/// Boundary convention: `k ≤ 0` yields 0 and `k ≥ n` yields 1. The lower end
/// differs from the exact P(X ≤ 0) = (1-p)ⁿ; the critical-value scan never
/// starts below 1, so the convention only fixes the edges.
///
/// # Errors
///
/// `Domain` when `n = 0` or `p ∉ [0, 1]`.
pub fn binomial_cdf(k: i64, n: u64, p: f64) -> Result<f64, StatsError> {
    let dist = binomial(n, p)?;
    Ok(cumulative(&dist, k, n))
}

/// Build a checked binomial distribution
pub(crate) fn binomial(n: u64, p: f64) -> Result<Binomial, StatsError> {
    if n == 0 {
        return Err(StatsError::domain("n", 0.0, "a positive integer"));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::domain("p", p, "a probability in [0, 1]"));
    }

    Binomial::new(p, n).map_err(|e| StatsError::Distribution(e.to_string()))
}

/// Rounded CDF of an already-built distribution, with the boundary convention
pub(crate) fn cumulative(dist: &Binomial, k: i64, n: u64) -> f64 {
    if k <= 0 {
        return 0.0;
    }
    let k = k as u64;
    if k >= n {
        return 1.0;
    }

    round_probability(dist.cdf(k))
}

fn round_probability(value: f64) -> f64 {
    let scale = 10f64.powi(CDF_DECIMALS);
    (value * scale).round() / scale
}

/// Inverse CDF of Student's t distribution with `degrees_of_freedom`
///
/// Returns `t` such that P(T ≤ t) = `probability`.
///
/// # Errors
///
/// `Domain` when the probability is outside (0, 1) or the degrees of freedom
/// are zero.
pub fn student_t_inverse_cdf(probability: f64, degrees_of_freedom: u64) -> Result<f64, StatsError> {
    if !(probability > 0.0 && probability < 1.0) {
        return Err(StatsError::domain(
            "probability",
            probability,
            "a probability in (0, 1)",
        ));
    }
    if degrees_of_freedom == 0 {
        return Err(StatsError::domain(
            "degrees_of_freedom",
            0.0,
            "a positive integer",
        ));
    }

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf(probability))
}

/// Cumulative probability P(X ≤ x) for X ~ N(mean, variance)
///
/// A NaN `x` yields NaN so undefined statistics keep propagating.
///
/// # Errors
///
/// `Domain` when the mean is not finite or the variance is not positive.
pub fn normal_cdf(x: f64, mean: f64, variance: f64) -> Result<f64, StatsError> {
    Ok(normal(mean, variance)?.cdf(x))
}

/// Inverse CDF of N(mean, variance)
///
/// # Errors
///
/// `Domain` when the probability is outside (0, 1), the mean is not finite or
/// the variance is not positive.
pub fn normal_inverse_cdf(probability: f64, mean: f64, variance: f64) -> Result<f64, StatsError> {
    if !(probability > 0.0 && probability < 1.0) {
        return Err(StatsError::domain(
            "probability",
            probability,
            "a probability in (0, 1)",
        ));
    }

    Ok(normal(mean, variance)?.inverse_cdf(probability))
}

fn normal(mean: f64, variance: f64) -> Result<Normal, StatsError> {
    if !mean.is_finite() {
        return Err(StatsError::domain("mean", mean, "a finite real"));
    }
    if !(variance > 0.0 && variance.is_finite()) {
        return Err(StatsError::domain("variance", variance, "a positive real"));
    }

    Normal::new(mean, variance.sqrt()).map_err(|e| StatsError::Distribution(e.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the CDF edges follow the boundary convention
        #[test]
        fn test_cdf_edges(n in 1u64..500, p in 0.0f64..=1.0) {
            prop_assert_eq!(binomial_cdf(0, n, p).unwrap(), 0.0);
            prop_assert_eq!(binomial_cdf(n as i64, n, p).unwrap(), 1.0);
        }

        /// Property: the CDF is a non-decreasing probability
        #[test]
        fn test_cdf_monotone(n in 1u64..200, p in 0.01f64..0.99) {
            let mut previous = 0.0;
            for k in 0..=n as i64 {
                let c = binomial_cdf(k, n, p).unwrap();
                prop_assert!((0.0..=1.0).contains(&c));
                prop_assert!(c >= previous);
                previous = c;
            }
        }
    }
}
