//! Binomial critical-value search
//!
//! Scans the counts `1..=n` of X ~ B(n, p) for the first one whose cumulative
//! probability reaches a target. The boundary is returned as a half-integer
//! when it falls strictly between two counts, and as the count itself when
//! the cumulative probability hits the target exactly:
//!
//! - lower tail: `floor(b)` is the largest count of the region X ≤ c
//! - upper tail: `ceil(b) + 1` is the smallest count of the region X ≥ c

use crate::distributions::{binomial, cumulative};
use crate::StatsError;
use hypotest_domain::{BoundarySearch, ScanRequest};
use tracing::{debug, trace};

/// Result of a (possibly cancelled) scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanOutcome {
    /// Boundary located (a count or a half-integer between counts)
    Found(f64),

    /// Every count was scanned without reaching the target
    Exhausted,

    /// A request component was NaN, so the boundary is undefined
    Undefined,

    /// The caller cancelled the scan before it finished
    Cancelled,
}

impl ScanOutcome {
    /// Boundary as a real number: NaN when exhausted or undefined, None when
    /// cancelled (a cancelled scan has no answer at all)
    pub fn boundary(&self) -> Option<f64> {
        match self {
            ScanOutcome::Found(b) => Some(*b),
            ScanOutcome::Exhausted | ScanOutcome::Undefined => Some(f64::NAN),
            ScanOutcome::Cancelled => None,
        }
    }
}

/// Locate the critical boundary for `request`
///
/// Returns NaN when no boundary exists or the request contains NaN.
///
/// # Errors
///
/// `Domain` when `n = 0` or `p ∉ [0, 1]`.
pub fn scan(request: &ScanRequest) -> Result<f64, StatsError> {
    let outcome = scan_until(request, || false)?;
    Ok(outcome.boundary().unwrap_or(f64::NAN))
}

/// Locate the critical boundary, polling `cancelled` before every count
///
/// The scan stops with [`ScanOutcome::Cancelled`] as soon as `cancelled`
/// returns true. Polling is the caller's cost to control: the closure may
/// itself only consult shared state every few calls.
///
/// # Errors
///
/// `Domain` when `n = 0` or `p ∉ [0, 1]`.
pub fn scan_until<F>(request: &ScanRequest, mut cancelled: F) -> Result<ScanOutcome, StatsError>
where
    F: FnMut() -> bool,
{
    if request.has_nan() {
        debug!(?request, "Scan request contains NaN, boundary undefined");
        return Ok(ScanOutcome::Undefined);
    }

    let n = request.sample_size;
    let target = request.target_probability;
    let dist = binomial(n, request.test_value)?;

    debug!(n, p = request.test_value, target, "Starting critical value scan");

    for i in 1..=n {
        if cancelled() {
            debug!(n, at = i, "Critical value scan cancelled");
            return Ok(ScanOutcome::Cancelled);
        }

        let current = cumulative(&dist, i as i64, n);
        trace!(i, current, "Scan step");

        if current > target {
            let boundary = i as f64 - 0.5;
            debug!(boundary, "Critical value scan found boundary between counts");
            return Ok(ScanOutcome::Found(boundary));
        }
        if current == target {
            debug!(boundary = i, "Critical value scan hit target exactly");
            return Ok(ScanOutcome::Found(i as f64));
        }
    }

    debug!(n, target, "Critical value scan exhausted");
    Ok(ScanOutcome::Exhausted)
}

/// Synchronous boundary search backed by [`scan`]
///
/// Invalid parameters yield NaN, which the evaluator reports as
/// indeterminate; validation normally rejects them long before this point.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialScan;

impl BoundarySearch for BinomialScan {
    fn find_boundary(&self, request: &ScanRequest) -> f64 {
        scan(request).unwrap_or_else(|e| {
            debug!(error = %e, "Boundary search rejected its parameters");
            f64::NAN
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binomial_cdf;

    #[test]
    fn test_upper_tail_boundary() {
        // P(X ≤ 18) = 0.930, P(X ≤ 19) = 0.964 for B(40, 0.35)
        let boundary = scan(&ScanRequest::new(40, 0.35, 0.95)).unwrap();
        assert_eq!(boundary, 18.5);
        assert_eq!(boundary.ceil() + 1.0, 20.0);
    }

    #[test]
    fn test_lower_tail_boundary() {
        // P(X ≤ 8) = 0.030, P(X ≤ 9) = 0.064 for B(40, 0.35)
        let boundary = scan(&ScanRequest::new(40, 0.35, 0.05)).unwrap();
        assert_eq!(boundary, 8.5);
        assert_eq!(boundary.floor(), 8.0);
    }

    #[test]
    fn test_exact_match_returns_count() {
        // P(X ≤ 2) = 7/128 exactly for B(10, 0.5)
        let boundary = scan(&ScanRequest::new(10, 0.5, 0.0546875)).unwrap();
        assert_eq!(boundary, 2.0);
    }

    #[test]
    fn test_exhaustion_is_nan() {
        let outcome = scan_until(&ScanRequest::new(10, 0.5, 1.5), || false).unwrap();
        assert_eq!(outcome, ScanOutcome::Exhausted);
        assert!(scan(&ScanRequest::new(10, 0.5, 1.5)).unwrap().is_nan());
    }

    #[test]
    fn test_target_of_one_matches_last_count() {
        assert_eq!(scan(&ScanRequest::new(10, 0.5, 1.0)).unwrap(), 10.0);
    }

    #[test]
    fn test_nan_request_is_undefined() {
        let outcome = scan_until(&ScanRequest::new(10, f64::NAN, 0.5), || false).unwrap();
        assert_eq!(outcome, ScanOutcome::Undefined);
        assert!(outcome.boundary().unwrap().is_nan());
    }

    #[test]
    fn test_invalid_parameters_are_domain_errors() {
        assert!(scan(&ScanRequest::new(0, 0.5, 0.5)).is_err());
        assert!(scan(&ScanRequest::new(10, 1.2, 0.5)).is_err());
        assert!(BinomialScan
            .find_boundary(&ScanRequest::new(10, 1.2, 0.5))
            .is_nan());
    }

    #[test]
    fn test_cancellation() {
        let mut polls = 0;
        let outcome = scan_until(&ScanRequest::new(1000, 0.5, 0.99), || {
            polls += 1;
            polls > 3
        })
        .unwrap();
        assert_eq!(outcome, ScanOutcome::Cancelled);
        assert_eq!(outcome.boundary(), None);
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_large_sample() {
        let boundary = scan(&ScanRequest::new(100_000, 0.5, 0.975)).unwrap();
        // Normal approximation: 50000 + 1.96 * 158.1 ≈ 50310
        assert!((boundary - 50_310.0).abs() < 5.0, "got {}", boundary);
        let c = binomial_cdf(boundary.ceil() as i64, 100_000, 0.5).unwrap();
        assert!(c > 0.975);
    }

    #[test]
    fn test_trait_matches_function() {
        let request = ScanRequest::new(40, 0.35, 0.95);
        assert_eq!(BinomialScan.find_boundary(&request), scan(&request).unwrap());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::binomial_cdf;
    use proptest::prelude::*;

    proptest! {
        /// Property: boundaries lie in [0.5, n + 0.5] and sit at the first
        /// count whose cumulative probability reaches the target
        #[test]
        fn test_boundary_is_first_crossing(
            n in 1u64..120,
            p in 0.01f64..0.99,
            target in 0.001f64..0.999,
        ) {
            let boundary = scan(&ScanRequest::new(n, p, target)).unwrap();
            prop_assert!(boundary >= 0.5 && boundary <= n as f64 + 0.5);

            let first = (1..=n as i64)
                .find(|&i| binomial_cdf(i, n, p).unwrap() >= target)
                .unwrap();
            let exact = binomial_cdf(first, n, p).unwrap() == target;
            let expected = if exact { first as f64 } else { first as f64 - 0.5 };
            prop_assert_eq!(boundary, expected);
        }

        /// Property: scanning is deterministic
        #[test]
        fn test_scan_idempotent(n in 1u64..200, p in 0.01f64..0.99, target in 0.01f64..0.99) {
            let request = ScanRequest::new(n, p, target);
            prop_assert_eq!(scan(&request).unwrap(), scan(&request).unwrap());
        }
    }
}
