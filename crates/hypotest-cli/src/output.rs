//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::session::Outcome;
use colored::*;
use hypotest_domain::{symbols, Decision, Tail, TailSelection};
use hypotest_evaluator::{BinomialSolution, CorrelationSolution, NormalSolution, Solution};
use hypotest_validation::{Form, ValidationResult, INEQUALITY_FIELD};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    precision: usize,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool, precision: usize) -> Self {
        Self {
            format,
            color_enabled,
            precision,
        }
    }

    /// Format whatever an evaluation produced.
    pub fn format_outcome(&self, outcome: &Outcome) -> Result<String> {
        match outcome {
            Outcome::Invalid(result) => self.format_rejection(result),
            Outcome::Solved(solution) => self.format_solution(solution),
        }
    }

    /// Format a worked solution.
    pub fn format_solution(&self, solution: &Solution) -> Result<String> {
        match self.format {
            OutputFormat::Steps => Ok(self.format_solution_steps(solution)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.solution_json(solution))?),
            OutputFormat::Quiet => Ok(verdict_word(&solution.decision()).to_string()),
        }
    }

    /// Format the fields that stopped an evaluation.
    pub fn format_rejection(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let fields: Vec<Value> = result
                    .rejected()
                    .map(|report| {
                        json!({
                            "field": report.name,
                            "input": report.field.raw,
                            "reason": report.reason.as_ref().map(|r| r.to_string()),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "status": "invalid",
                    "fields": fields,
                }))?)
            }
            OutputFormat::Quiet => Ok("invalid".to_string()),
            OutputFormat::Steps => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Input", "Problem"]);
                for report in result.rejected() {
                    let reason = report
                        .reason
                        .as_ref()
                        .map(|r| r.to_string())
                        .unwrap_or_default();
                    builder.push_record([
                        report.label.to_string(),
                        format!("{:?}", report.field.raw),
                        reason,
                    ]);
                }
                Ok(format!(
                    "{}\n{}",
                    self.warning("Invalid input, nothing was computed"),
                    render(builder)
                ))
            }
        }
    }

    /// Format the current form with the status of every field.
    pub fn format_form(&self, form: &Form, result: &ValidationResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Name", "Input", "Status"]);

        for report in &result.fields {
            let status = match &report.reason {
                Some(reason) => reason.to_string(),
                None => "ok".to_string(),
            };
            builder.push_record([
                report.label.to_string(),
                report.name.to_string(),
                report.field.raw.clone(),
                status,
            ]);
        }
        builder.push_record([
            "Alternative hypothesis".to_string(),
            INEQUALITY_FIELD.to_string(),
            form.inequality().symbol().to_string(),
            "ok".to_string(),
        ]);

        format!(
            "{}\n{}",
            self.info(&format!("{} test", form.family().as_str())),
            render(builder)
        )
    }

    /// List the field names a form accepts.
    pub fn format_fields(&self, form: &Form) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Name", "Field"]);
        for spec in form.fields() {
            builder.push_record([spec.name, spec.label]);
        }
        builder.push_record([INEQUALITY_FIELD, "Alternative hypothesis (<, >, !=)"]);
        render(builder)
    }

    fn format_solution_steps(&self, solution: &Solution) -> String {
        let (null, alternative) = solution.hypotheses();
        let mut steps = vec![("Hypotheses".to_string(), format!("{}, {}", null, alternative))];

        match solution {
            Solution::Binomial(s) => self.binomial_steps(s, &mut steps),
            Solution::Normal(s) => self.normal_steps(s, &mut steps),
            Solution::Correlation(s) => self.correlation_steps(s, &mut steps),
        }

        let mut builder = Builder::default();
        builder.push_record(["Step", "Working"]);
        for (step, working) in steps {
            builder.push_record([step, working]);
        }

        format!("{}\n{}", render(builder), self.conclusion(solution))
    }

    fn binomial_steps(&self, s: &BinomialSolution, steps: &mut Vec<(String, String)>) {
        let p = &s.parameters;
        steps.push((
            "Distribution".to_string(),
            format!("X ~ B({}, {})", p.sample_size, self.num(p.test_value)),
        ));
        steps.push(self.significance_step(s.significance.stated, s.significance.value, s.significance.halved));
        if s.selection.compared {
            steps.push((
                "Expected value".to_string(),
                format!(
                    "n{}p = {}{}{} = {}",
                    symbols::TIMES,
                    p.sample_size,
                    symbols::TIMES,
                    self.num(p.test_value),
                    self.num(s.expected_value)
                ),
            ));
        }
        steps.push(("Tail".to_string(), self.selection(&s.selection, "x")));

        if let (Some(target), Some(tail)) = (s.target_probability, s.selection.tail) {
            steps.push((
                "Critical value".to_string(),
                format!(
                    "smallest b with P(X {} b) > {} {} b = {}",
                    symbols::LESS_EQUAL,
                    self.num(target),
                    symbols::IMPLIES,
                    self.num(s.boundary)
                ),
            ));
            let region = match s.critical_region {
                Some(region) => region.to_string(),
                None => symbols::UNDEFINED.to_string(),
            };
            steps.push((
                "Critical region".to_string(),
                format!("{}: {} ({} tail)", symbols::CRITICAL_REGION, region, tail),
            ));
        }

        if let Some(verdict) = s.decision.verdict() {
            let membership = if verdict.in_critical_region {
                symbols::ELEMENT_OF
            } else {
                symbols::NOT_ELEMENT_OF
            };
            steps.push((
                "Comparison".to_string(),
                format!("x = {} {} {}", p.sample_value, membership, symbols::CRITICAL_REGION),
            ));
        }
    }

    fn normal_steps(&self, s: &NormalSolution, steps: &mut Vec<(String, String)>) {
        let p = &s.parameters;
        steps.push((
            "Distribution".to_string(),
            format!(
                "{} ~ N({}, {}²/{}) = N({}, {})",
                symbols::SAMPLE_MEAN,
                self.num(p.distribution_mean),
                self.num(p.distribution_std_dev),
                p.sample_size,
                self.num(p.distribution_mean),
                self.num(s.sampling_variance)
            ),
        ));
        steps.push((
            "Standard score".to_string(),
            format!(
                "z = ({} - {}) / {} = {}",
                self.num(p.sample_mean),
                self.num(p.distribution_mean),
                self.num(s.standard_error),
                self.num(s.z_score)
            ),
        ));
        steps.push(self.significance_step(s.significance.stated, s.significance.value, s.significance.halved));
        steps.push(("Tail".to_string(), self.selection(&s.selection, "x̅")));

        if let Some(tail) = s.selection.tail {
            steps.push((
                "Tail probability".to_string(),
                format!(
                    "P({} {} {}) = {}",
                    symbols::SAMPLE_MEAN,
                    tail.region_symbol(),
                    self.num(p.sample_mean),
                    self.num(s.tail_probability)
                ),
            ));
            steps.push((
                "Critical region".to_string(),
                format!(
                    "{}: {} {} {}",
                    symbols::CRITICAL_REGION,
                    symbols::SAMPLE_MEAN,
                    tail.region_symbol(),
                    self.num(s.critical_mean)
                ),
            ));
        }

        if let Some(verdict) = s.decision.verdict() {
            let relation = if verdict.in_critical_region {
                symbols::LESS
            } else {
                symbols::GREATER_EQUAL
            };
            steps.push((
                "Comparison".to_string(),
                format!(
                    "{} {} {}",
                    self.num(s.tail_probability),
                    relation,
                    self.num(s.significance.value)
                ),
            ));
        }
    }

    fn correlation_steps(&self, s: &CorrelationSolution, steps: &mut Vec<(String, String)>) {
        let p = &s.parameters;
        steps.push(self.significance_step(s.significance.stated, s.significance.value, s.significance.halved));
        steps.push((
            "Degrees of freedom".to_string(),
            format!("n - 2 = {} - 2 = {}", p.sample_size, s.degrees_of_freedom),
        ));
        steps.push((
            "t quantile".to_string(),
            format!(
                "t({}, {}) = {}",
                s.degrees_of_freedom,
                self.num(s.significance.value),
                self.num(s.t_value)
            ),
        ));
        steps.push((
            "Critical value".to_string(),
            format!(
                "cv = |t| / √(t² + {}) = {}",
                s.degrees_of_freedom,
                self.num(s.critical_value)
            ),
        ));
        steps.push(("Tail".to_string(), self.selection(&s.selection, "r")));

        let statistic = if p.inequality.is_two_tailed() { "|r|" } else { "r" };
        let relation = match (s.decision, s.selection.tail) {
            (Decision::Indeterminate(_), _) | (_, None) => "=",
            (Decision::Decided(v), Some(Tail::Upper)) if v.in_critical_region => symbols::GREATER,
            (Decision::Decided(v), Some(Tail::Lower)) if v.in_critical_region => symbols::LESS,
            (Decision::Decided(_), Some(Tail::Upper)) => symbols::LESS_EQUAL,
            (Decision::Decided(_), Some(Tail::Lower)) => symbols::GREATER_EQUAL,
        };
        if s.selection.tail.is_some() {
            steps.push((
                "Comparison".to_string(),
                format!(
                    "{} = {} {} {}",
                    statistic,
                    self.num(s.compared_statistic),
                    relation,
                    self.num(s.boundary)
                ),
            ));
        }
    }

    fn significance_step(&self, stated: f64, value: f64, halved: bool) -> (String, String) {
        let working = if halved {
            format!(
                "{} = {}, two-tailed {} {}/2 = {}",
                symbols::ALPHA,
                self.num(stated),
                symbols::IMPLIES,
                symbols::ALPHA,
                self.num(value)
            )
        } else {
            format!("{} = {}", symbols::ALPHA, self.num(value))
        };
        ("Significance".to_string(), working)
    }

    fn selection(&self, selection: &TailSelection, observed: &str) -> String {
        let tail = selection
            .tail
            .map(|t| format!("{} tail", t))
            .unwrap_or_else(|| symbols::UNDEFINED.to_string());

        if !selection.compared {
            return format!("fixed by {}: {}", symbols::H1, tail);
        }

        let relation = if selection.observed < selection.null_value {
            symbols::LESS
        } else if selection.observed > selection.null_value {
            symbols::GREATER
        } else {
            "="
        };
        format!(
            "{} = {} {} {} {} {}",
            observed,
            self.num(selection.observed),
            relation,
            self.num(selection.null_value),
            symbols::IMPLIES,
            tail
        )
    }

    fn conclusion(&self, solution: &Solution) -> String {
        let (_, alternative) = solution.hypotheses();
        let claim = match alternative.split_once(": ") {
            Some((_, claim)) => claim.to_string(),
            None => alternative.clone(),
        };

        match solution.decision() {
            Decision::Decided(verdict) => {
                let action = if verdict.reject_null {
                    format!("Reject {}", symbols::H0)
                } else {
                    format!("Do not reject {}", symbols::H0)
                };
                let suggestion = match solution {
                    Solution::Correlation(s) => {
                        format!("there is {} {}", s.conclusion(), symbols::CONTEXT)
                    }
                    _ => format!("{} {}", claim, symbols::CONTEXT),
                };
                let message = format!(
                    "{}: there is {} evidence at the {}% level to suggest {}",
                    action,
                    verdict.evidence(),
                    self.num(solution.significance().stated * 100.0),
                    suggestion
                );
                if verdict.reject_null {
                    self.success(&message)
                } else {
                    self.info(&message)
                }
            }
            Decision::Indeterminate(reason) => {
                self.warning(&format!("Indeterminate: {}", reason))
            }
        }
    }

    fn solution_json(&self, solution: &Solution) -> Value {
        let (null, alternative) = solution.hypotheses();
        let significance = solution.significance();

        let details = match solution {
            Solution::Binomial(s) => json!({
                "sample_size": s.parameters.sample_size,
                "test_value": s.parameters.test_value,
                "sample_value": s.parameters.sample_value,
                "expected_value": s.expected_value,
                "target_probability": s.target_probability,
                "boundary": s.boundary,
                "critical_region": s.critical_region.map(|r| json!({
                    "tail": r.tail.as_str(),
                    "bound": r.bound,
                    "text": r.to_string(),
                })),
            }),
            Solution::Normal(s) => json!({
                "mean": s.parameters.distribution_mean,
                "std_dev": s.parameters.distribution_std_dev,
                "sample_size": s.parameters.sample_size,
                "sample_mean": s.parameters.sample_mean,
                "sampling_variance": s.sampling_variance,
                "standard_error": s.standard_error,
                "z_score": s.z_score,
                "tail_probability": s.tail_probability,
                "critical_mean": s.critical_mean,
            }),
            Solution::Correlation(s) => json!({
                "sample_size": s.parameters.sample_size,
                "pmcc": s.parameters.sample_pmcc,
                "degrees_of_freedom": s.degrees_of_freedom,
                "t_value": s.t_value,
                "critical_value": s.critical_value,
                "compared_statistic": s.compared_statistic,
                "boundary": s.boundary,
                "conclusion": s.conclusion(),
            }),
        };

        let decision = match solution.decision() {
            Decision::Decided(v) => json!({
                "status": verdict_word(&solution.decision()),
                "tail": v.tail.as_str(),
                "in_critical_region": v.in_critical_region,
                "reject_null": v.reject_null,
            }),
            Decision::Indeterminate(reason) => json!({
                "status": verdict_word(&solution.decision()),
                "reason": reason.description(),
            }),
        };

        json!({
            "family": solution.family().as_str(),
            "null_hypothesis": null,
            "alternative_hypothesis": alternative,
            "inequality": solution.inequality().as_str(),
            "significance": {
                "stated": significance.stated,
                "actual": significance.value,
                "halved": significance.halved,
            },
            "details": details,
            "decision": decision,
        })
    }

    /// Format a real number at the configured precision.
    ///
    /// Trailing zeros are dropped; NaN renders as "undefined".
    pub fn num(&self, value: f64) -> String {
        if value.is_nan() {
            return symbols::UNDEFINED.to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let text = format!("{:.*}", self.precision, value);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            text
        };
        if text == "-0" {
            "0".to_string()
        } else {
            text
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Single word for a decision, as printed by the quiet format
pub fn verdict_word(decision: &Decision) -> &'static str {
    match decision.reject_null() {
        Some(true) => "reject",
        Some(false) => "retain",
        None => "indeterminate",
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
