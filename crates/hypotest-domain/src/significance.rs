//! Actual significance level module

use crate::Inequality;

/// Significance level actually applied to one tail
///
/// Equal to α for a one-tailed test and α/2 for a two-tailed test.
/// A NaN α (invalid input upstream) stays NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActualSignificanceLevel {
    /// Significance level as entered (α)
    pub stated: f64,
    /// Level applied to the relevant tail
    pub value: f64,
    /// Whether α was halved
    pub halved: bool,
}

impl ActualSignificanceLevel {
    /// Derive the actual level from α and the alternative hypothesis
    pub fn new(significance_level: f64, inequality: Inequality) -> Self {
        let halved = inequality.is_two_tailed();
        let value = if halved {
            significance_level / 2.0
        } else {
            significance_level
        };

        Self {
            stated: significance_level,
            value,
            halved,
        }
    }

    /// Level as a percentage, for display
    pub fn as_percent(&self) -> f64 {
        self.value * 100.0
    }

    /// Whether the level is a usable probability
    pub fn is_valid(&self) -> bool {
        self.value > 0.0 && self.value < 1.0
    }

    /// Cumulative probability bounding the critical region of `tail`
    ///
    /// The lower tail is bounded by α itself, the upper tail by 1 - α.
    pub fn cumulative_target(&self, tail: crate::Tail) -> f64 {
        match tail {
            crate::Tail::Lower => self.value,
            crate::Tail::Upper => 1.0 - self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tail;

    #[test]
    fn test_one_tailed_keeps_alpha() {
        let level = ActualSignificanceLevel::new(0.05, Inequality::Greater);
        assert_eq!(level.value, 0.05);
        assert!(!level.halved);
    }

    #[test]
    fn test_two_tailed_halves_alpha() {
        let level = ActualSignificanceLevel::new(0.05, Inequality::NotEqual);
        assert_eq!(level.value, 0.025);
        assert!(level.halved);
        assert_eq!(level.as_percent(), 2.5);
    }

    #[test]
    fn test_nan_propagates() {
        let level = ActualSignificanceLevel::new(f64::NAN, Inequality::NotEqual);
        assert!(level.value.is_nan());
        assert!(!level.is_valid());
    }

    #[test]
    fn test_cumulative_target() {
        let level = ActualSignificanceLevel::new(0.1, Inequality::Less);
        assert_eq!(level.cumulative_target(Tail::Lower), 0.1);
        assert!((level.cumulative_target(Tail::Upper) - 0.9).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a two-tailed level never exceeds one half
        #[test]
        fn test_two_tailed_at_most_half(alpha in 0.0001f64..0.9999) {
            let level = ActualSignificanceLevel::new(alpha, Inequality::NotEqual);
            prop_assert!(level.value > 0.0 && level.value <= 0.5);
            prop_assert!(level.is_valid());
        }
    }
}
