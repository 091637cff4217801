//! Verdict module
//!
//! The terminal output of one evaluation. Anything mathematically undefined
//! along the way becomes [`Decision::Indeterminate`] instead of a verdict, so
//! a presentation layer can never show a plausible but wrong conclusion.

use crate::Tail;

/// Conclusion of a hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Tail holding the critical region
    pub tail: Tail,
    /// Whether the sample statistic lies in the critical region
    pub in_critical_region: bool,
    /// Whether H₀ is rejected
    pub reject_null: bool,
}

impl Verdict {
    /// Build a verdict; H₀ is rejected exactly when the statistic is critical
    pub fn new(tail: Tail, in_critical_region: bool) -> Self {
        Self {
            tail,
            in_critical_region,
            reject_null: in_critical_region,
        }
    }

    /// "sufficient" or "insufficient" evidence wording
    pub fn evidence(&self) -> &'static str {
        if self.reject_null {
            "sufficient"
        } else {
            "insufficient"
        }
    }
}

/// Why an evaluation could not reach a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indeterminate {
    /// Two-tailed test where the sample statistic equals the null value
    TailTie,

    /// An input or intermediate value was NaN or infinite
    UndefinedValue,

    /// The binomial critical-value scan found no boundary
    ScanExhausted,

    /// The sample statistic coincides with the critical value
    DegenerateCriticalValue,
}

impl Indeterminate {
    /// Human-readable explanation
    pub fn description(&self) -> &'static str {
        match self {
            Indeterminate::TailTie => {
                "sample statistic equals the null value, so neither tail applies"
            }
            Indeterminate::UndefinedValue => "an intermediate value is undefined",
            Indeterminate::ScanExhausted => "no critical value exists in the sample space",
            Indeterminate::DegenerateCriticalValue => {
                "sample statistic equals the critical value exactly"
            }
        }
    }
}

impl std::fmt::Display for Indeterminate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of an evaluation: a verdict or an explicit indeterminate result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The test reached a conclusion
    Decided(Verdict),
    /// The test is undefined for these inputs
    Indeterminate(Indeterminate),
}

impl Decision {
    /// The verdict, if one was reached
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Decision::Decided(verdict) => Some(verdict),
            Decision::Indeterminate(_) => None,
        }
    }

    /// Whether H₀ is rejected (None when indeterminate)
    pub fn reject_null(&self) -> Option<bool> {
        self.verdict().map(|v| v.reject_null)
    }

    /// Whether the decision is indeterminate
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Decision::Indeterminate(_))
    }
}

impl From<Indeterminate> for Decision {
    fn from(reason: Indeterminate) -> Self {
        Decision::Indeterminate(reason)
    }
}

/// Record of how the rejection tail was chosen
///
/// For a one-tailed test the tail is fixed by H₁. For a two-tailed test it is
/// chosen by comparing the observed statistic with its value under H₀; an
/// exact tie (or a NaN on either side) leaves the tail undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailSelection {
    /// Statistic's value under H₀ (n⋅p, μ or 0)
    pub null_value: f64,
    /// Observed statistic
    pub observed: f64,
    /// Selected tail, None when undefined
    pub tail: Option<Tail>,
    /// Whether the tail was chosen by comparison (two-tailed test)
    pub compared: bool,
}

impl TailSelection {
    /// Tail fixed by a one-tailed alternative
    pub fn fixed(tail: Tail, null_value: f64, observed: f64) -> Self {
        Self {
            null_value,
            observed,
            tail: Some(tail),
            compared: false,
        }
    }

    /// Tail chosen by comparing the observation with the null value
    pub fn compare(null_value: f64, observed: f64) -> Self {
        let tail = if observed < null_value {
            Some(Tail::Lower)
        } else if observed > null_value {
            Some(Tail::Upper)
        } else {
            None
        };

        Self {
            null_value,
            observed,
            tail,
            compared: true,
        }
    }

    /// The tail, or the indeterminate reason when there is none
    pub fn require(&self) -> Result<Tail, Indeterminate> {
        match self.tail {
            Some(tail) => Ok(tail),
            None if self.null_value.is_nan() || self.observed.is_nan() => {
                Err(Indeterminate::UndefinedValue)
            }
            None => Err(Indeterminate::TailTie),
        }
    }
}
