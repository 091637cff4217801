//! Critical values for the product-moment correlation coefficient
//!
//! Under H₀: ρ = 0 the statistic r·√(n-2)/√(1-r²) follows Student's t with
//! n - 2 degrees of freedom. Inverting that relation turns a t critical value
//! into a threshold for |r|:
//!
//! ```text
//! t² = tinv(α, n - 2)²
//! r  = √(t² / (t² + n - 2))
//! ```

use crate::{student_t_inverse_cdf, StatsError};

/// Critical |r| for a sample of `sample_size` pairs at one-tail level `significance`
///
/// # Errors
///
/// `Domain` when `sample_size ≤ 2` (no degrees of freedom) or the
/// significance level lies outside (0, 1).
pub fn correlation_critical_value(sample_size: u64, significance: f64) -> Result<f64, StatsError> {
    let degrees_of_freedom = sample_size.saturating_sub(2);
    if degrees_of_freedom == 0 {
        return Err(StatsError::Domain {
            parameter: "sample_size",
            value: sample_size as f64,
            expected: "an integer of at least 3",
        });
    }

    let t = student_t_inverse_cdf(significance, degrees_of_freedom)?;
    let t2 = t * t;
    Ok((t2 / (t2 + degrees_of_freedom as f64)).sqrt())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the threshold is strictly between 0 and 1
        #[test]
        fn test_open_unit_interval(n in 3u64..2000, alpha in 0.0005f64..0.49) {
            let cv = correlation_critical_value(n, alpha).unwrap();
            prop_assert!(cv > 0.0 && cv < 1.0);
        }

        /// Property: larger samples need a smaller |r|
        #[test]
        fn test_decreasing_in_sample_size(n in 3u64..500, alpha in 0.001f64..0.4) {
            let smaller = correlation_critical_value(n, alpha).unwrap();
            let larger = correlation_critical_value(n + 1, alpha).unwrap();
            prop_assert!(larger < smaller);
        }

        /// Property: a looser significance level needs a smaller |r|
        #[test]
        fn test_decreasing_in_significance(n in 3u64..500, alpha in 0.001f64..0.4) {
            let strict = correlation_critical_value(n, alpha).unwrap();
            let loose = correlation_critical_value(n, alpha + 0.05).unwrap();
            prop_assert!(loose < strict);
        }
    }
}
