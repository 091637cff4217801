//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the evaluator and the code that
//! performs expensive work on its behalf.

/// Request for a binomial critical boundary
///
/// This triple is the whole payload crossing the asynchronous boundary: the
/// response is a single real number (the boundary) or NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRequest {
    /// Number of trials n
    pub sample_size: u64,
    /// Proportion p under H₀
    pub test_value: f64,
    /// Cumulative probability the boundary must first exceed
    pub target_probability: f64,
}

impl ScanRequest {
    /// Create a new scan request
    pub fn new(sample_size: u64, test_value: f64, target_probability: f64) -> Self {
        Self {
            sample_size,
            test_value,
            target_probability,
        }
    }

    /// Whether any component is NaN, in which case the answer is NaN
    pub fn has_nan(&self) -> bool {
        self.test_value.is_nan() || self.target_probability.is_nan()
    }
}

/// Source of binomial critical boundaries
///
/// Implemented by the statistics layer (hypotest-stats) for synchronous use,
/// and by anything that already holds an answer (e.g. a result delivered by
/// the background worker).
pub trait BoundarySearch {
    /// Boundary `b` such that P(X ≤ b) first exceeds the target, or NaN
    fn find_boundary(&self, request: &ScanRequest) -> f64;
}

/// A boundary that has already been computed
impl BoundarySearch for f64 {
    fn find_boundary(&self, _request: &ScanRequest) -> f64 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_detection() {
        assert!(!ScanRequest::new(40, 0.35, 0.95).has_nan());
        assert!(ScanRequest::new(40, f64::NAN, 0.95).has_nan());
        assert!(ScanRequest::new(40, 0.35, f64::NAN).has_nan());
    }

    #[test]
    fn test_precomputed_boundary() {
        let request = ScanRequest::new(40, 0.35, 0.95);
        assert_eq!(18.5_f64.find_boundary(&request), 18.5);
    }
}
