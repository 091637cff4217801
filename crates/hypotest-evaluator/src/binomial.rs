//! Binomial proportion test
//!
//! Evaluation runs in two steps so the critical-value scan can happen
//! elsewhere (a background task, a cache, a precomputed value):
//!
//! 1. [`plan`] derives the actual significance level, selects the tail and
//!    builds the [`ScanRequest`] for it.
//! 2. [`BinomialPlan::resolve`] turns the boundary returned by the scan into
//!    an inclusive integer critical region and a decision.

use hypotest_domain::{
    ActualSignificanceLevel, BinomialParameters, BoundarySearch, Decision, Indeterminate,
    ScanRequest, Tail, TailSelection, Verdict,
};
use tracing::debug;

/// Everything known about a binomial test before the scan runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialPlan {
    /// Validated inputs
    pub parameters: BinomialParameters,
    /// α, halved for a two-tailed test
    pub significance: ActualSignificanceLevel,
    /// n⋅p, the mean of X under H₀
    pub expected_value: f64,
    /// Tail under test
    pub selection: TailSelection,
    /// Scan to run, absent when no tail could be selected
    pub request: Option<ScanRequest>,
}

/// Plan a binomial test
pub fn plan(parameters: &BinomialParameters) -> BinomialPlan {
    let significance = parameters.actual_significance();
    let expected_value = parameters.expected_value();
    let observed = parameters.sample_value as f64;

    let selection = match parameters.inequality.tail() {
        Some(tail) => TailSelection::fixed(tail, expected_value, observed),
        None => TailSelection::compare(expected_value, observed),
    };

    let request = selection.require().ok().map(|tail| {
        ScanRequest::new(
            parameters.sample_size,
            parameters.test_value,
            significance.cumulative_target(tail),
        )
    });

    debug!(
        n = parameters.sample_size,
        p = parameters.test_value,
        tail = ?selection.tail,
        target = ?request.map(|r| r.target_probability),
        "Planned binomial test"
    );

    BinomialPlan {
        parameters: *parameters,
        significance,
        expected_value,
        selection,
        request,
    }
}

/// Inclusive integer critical region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalRegion {
    /// Side of the distribution
    pub tail: Tail,
    /// X ≤ bound (lower) or X ≥ bound (upper)
    pub bound: i64,
}

impl CriticalRegion {
    /// Region for a scan boundary: `floor(b)` below, `ceil(b) + 1` above
    ///
    /// None when the boundary is NaN.
    pub fn from_boundary(tail: Tail, boundary: f64) -> Option<Self> {
        if boundary.is_nan() {
            return None;
        }
        let bound = match tail {
            Tail::Lower => boundary.floor(),
            Tail::Upper => boundary.ceil() + 1.0,
        };
        Some(Self {
            tail,
            bound: bound as i64,
        })
    }

    /// Whether a count lies in the region
    pub fn contains(&self, count: u64) -> bool {
        let count = count as i64;
        match self.tail {
            Tail::Lower => count <= self.bound,
            Tail::Upper => count >= self.bound,
        }
    }
}

impl std::fmt::Display for CriticalRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} {}", self.tail.region_symbol(), self.bound)
    }
}

/// Worked binomial test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialSolution {
    /// Validated inputs
    pub parameters: BinomialParameters,
    /// α, halved for a two-tailed test
    pub significance: ActualSignificanceLevel,
    /// n⋅p
    pub expected_value: f64,
    /// Tail under test
    pub selection: TailSelection,
    /// Cumulative probability the scan searched for
    pub target_probability: Option<f64>,
    /// Boundary returned by the scan (NaN when none)
    pub boundary: f64,
    /// Inclusive critical region
    pub critical_region: Option<CriticalRegion>,
    /// Outcome
    pub decision: Decision,
}

impl BinomialPlan {
    /// Finish the test with the boundary located for [`BinomialPlan::request`]
    ///
    /// The boundary is ignored when the plan has no request.
    pub fn resolve(&self, boundary: f64) -> BinomialSolution {
        let mut solution = BinomialSolution {
            parameters: self.parameters,
            significance: self.significance,
            expected_value: self.expected_value,
            selection: self.selection,
            target_probability: self.request.map(|r| r.target_probability),
            boundary: f64::NAN,
            critical_region: None,
            decision: Decision::Indeterminate(Indeterminate::UndefinedValue),
        };

        let tail = match self.selection.require() {
            Ok(tail) => tail,
            Err(reason) => {
                debug!(%reason, "Binomial tail undefined");
                solution.decision = reason.into();
                return solution;
            }
        };

        solution.boundary = boundary;
        solution.decision = match CriticalRegion::from_boundary(tail, boundary) {
            Some(region) => {
                solution.critical_region = Some(region);
                let in_region = region.contains(self.parameters.sample_value);
                Decision::Decided(Verdict::new(tail, in_region))
            }
            None if self.request.is_some_and(|r| r.has_nan()) => {
                Decision::Indeterminate(Indeterminate::UndefinedValue)
            }
            None => {
                debug!(request = ?self.request, "Binomial scan found no boundary");
                Decision::Indeterminate(Indeterminate::ScanExhausted)
            }
        };
        solution
    }

    /// Finish the test by running `search` for the planned request
    pub fn resolve_with<S: BoundarySearch + ?Sized>(&self, search: &S) -> BinomialSolution {
        let boundary = self
            .request
            .map(|request| search.find_boundary(&request))
            .unwrap_or(f64::NAN);
        self.resolve(boundary)
    }
}

/// Evaluate a binomial test synchronously with `search`
pub fn evaluate_with<S: BoundarySearch + ?Sized>(
    parameters: &BinomialParameters,
    search: &S,
) -> BinomialSolution {
    plan(parameters).resolve_with(search)
}
