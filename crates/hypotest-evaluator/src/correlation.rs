//! Correlation (PMCC) test of H₀: ρ = 0

use crate::EvaluatorError;
use hypotest_domain::{
    ActualSignificanceLevel, CorrelationParameters, Decision, Indeterminate, Inequality, Tail,
    TailSelection, Verdict,
};
use hypotest_stats::{correlation_critical_value, student_t_inverse_cdf};
use tracing::debug;

/// Worked correlation test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationSolution {
    /// Validated inputs
    pub parameters: CorrelationParameters,
    /// α, halved for a two-tailed test
    pub significance: ActualSignificanceLevel,
    /// n - 2
    pub degrees_of_freedom: u64,
    /// Lower-tail t quantile at the actual significance level
    pub t_value: f64,
    /// Critical |r|
    pub critical_value: f64,
    /// Tail under test (for a two-tailed test, the sign of r)
    pub selection: TailSelection,
    /// |r| for a two-tailed test, r otherwise
    pub compared_statistic: f64,
    /// -cv for `<`, cv otherwise
    pub boundary: f64,
    /// Outcome
    pub decision: Decision,
}

impl CorrelationSolution {
    /// Kind of correlation the alternative hypothesis claims
    pub fn conclusion(&self) -> &'static str {
        conclusion(self.parameters.inequality)
    }
}

/// Kind of correlation claimed by each alternative hypothesis
pub fn conclusion(inequality: Inequality) -> &'static str {
    match inequality {
        Inequality::Less => "negative correlation",
        Inequality::Greater => "positive correlation",
        Inequality::NotEqual => "correlation",
    }
}

/// Evaluate a correlation test
///
/// A statistic exactly equal to its boundary leaves the comparison
/// undecidable and is reported as [`Indeterminate::DegenerateCriticalValue`].
///
/// # Errors
///
/// `InvalidParameters` when `n ≤ 2`; `Stats` when the significance level is
/// outside (0, 1).
pub fn evaluate(parameters: &CorrelationParameters) -> Result<CorrelationSolution, EvaluatorError> {
    let degrees_of_freedom = parameters.degrees_of_freedom().ok_or_else(|| {
        EvaluatorError::InvalidParameters(format!(
            "correlation needs at least 3 observations, got {}",
            parameters.sample_size
        ))
    })?;

    let significance = parameters.actual_significance();
    let t_value = student_t_inverse_cdf(significance.value, degrees_of_freedom)?;
    let critical_value = correlation_critical_value(parameters.sample_size, significance.value)?;
    let r = parameters.sample_pmcc;

    let (selection, compared_statistic, boundary) = match parameters.inequality {
        Inequality::Less => (TailSelection::fixed(Tail::Lower, 0.0, r), r, -critical_value),
        Inequality::Greater => (TailSelection::fixed(Tail::Upper, 0.0, r), r, critical_value),
        Inequality::NotEqual => (two_tailed_selection(r), r.abs(), critical_value),
    };

    let decision = match selection.require() {
        Err(reason) => reason.into(),
        Ok(_) if compared_statistic.is_nan() => Indeterminate::UndefinedValue.into(),
        Ok(_) if compared_statistic == boundary => {
            Indeterminate::DegenerateCriticalValue.into()
        }
        Ok(tail) => {
            let beyond = match parameters.inequality {
                Inequality::Less => compared_statistic < boundary,
                Inequality::Greater | Inequality::NotEqual => compared_statistic > boundary,
            };
            Decision::Decided(Verdict::new(tail, beyond))
        }
    };

    debug!(
        n = parameters.sample_size,
        r,
        critical_value,
        ?decision,
        "Evaluated correlation test"
    );

    Ok(CorrelationSolution {
        parameters: *parameters,
        significance,
        degrees_of_freedom,
        t_value,
        critical_value,
        selection,
        compared_statistic,
        boundary,
        decision,
    })
}

/// Tail label for a two-tailed test
///
/// |r| alone decides, so r = 0 is an ordinary (non-critical) statistic; its
/// sign only names the tail, with r = 0 counted as upper.
fn two_tailed_selection(r: f64) -> TailSelection {
    let tail = if r.is_nan() {
        None
    } else if r < 0.0 {
        Some(Tail::Lower)
    } else {
        Some(Tail::Upper)
    };

    TailSelection {
        null_value: 0.0,
        observed: r,
        tail,
        compared: true,
    }
}
