//! Editable test session shared by the one-shot commands and the REPL.

use crate::config::Config;
use crate::error::Result;
use hypotest_domain::{TestFamily, TestParameters};
use hypotest_evaluator::binomial::{self, BinomialPlan};
use hypotest_evaluator::{HypothesisEvaluator, Solution};
use hypotest_validation::{Form, InputValidator, ValidationResult};
use hypotest_worker::{ScanTicket, ScanWorker, WorkerMetrics};
use tracing::debug;

/// Result of evaluating the current form
#[derive(Debug, Clone)]
pub enum Outcome {
    /// At least one field is invalid; nothing was computed
    Invalid(ValidationResult),
    /// The worked solution
    Solved(Solution),
}

/// What [`Session::start`] produced
pub enum Evaluation {
    /// Nothing left to compute
    Ready(Outcome),
    /// A binomial solution waiting on its boundary scan
    Scanning(PendingSolution),
}

/// Binomial solution whose critical value is still being scanned for
pub struct PendingSolution {
    plan: BinomialPlan,
    ticket: ScanTicket,
}

impl PendingSolution {
    /// Worker generation of the scan
    pub fn generation(&self) -> u64 {
        self.ticket.generation()
    }

    /// Wait for the boundary and finish the solution
    ///
    /// # Errors
    ///
    /// `Superseded` once the session has started a newer evaluation.
    pub async fn wait(self) -> Result<Outcome> {
        let boundary = self.ticket.wait().await?.into_boundary()?;
        Ok(Outcome::Solved(Solution::Binomial(self.plan.resolve(boundary))))
    }
}

/// A form, its validator and the engines that evaluate it
///
/// Binomial boundaries are located by the background worker, so a newer
/// evaluation always supersedes a scan still in flight.
pub struct Session {
    form: Form,
    validator: InputValidator,
    evaluator: HypothesisEvaluator,
    worker: ScanWorker,
}

impl Session {
    /// Start a session on the default form of `family`
    pub fn new(family: TestFamily, config: &Config) -> Result<Self> {
        Ok(Self {
            form: Form::new(family),
            validator: InputValidator::new(config.validation.clone()),
            evaluator: HypothesisEvaluator::new(),
            worker: ScanWorker::new(config.worker.clone())?,
        })
    }

    /// Current form
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Family of the current form
    pub fn family(&self) -> TestFamily {
        self.form.family()
    }

    /// Switch to the default form of another family
    pub fn switch(&mut self, family: TestFamily) {
        self.worker.cancel();
        self.form = Form::new(family);
    }

    /// Replace the raw text of one field
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        self.form.set(name, raw)?;
        Ok(())
    }

    /// Validate the form without computing anything
    pub fn validate(&self) -> ValidationResult {
        self.validator.validate(&self.form)
    }

    /// Validate and, when every field is valid, solve the test
    pub async fn evaluate(&mut self) -> Result<Outcome> {
        match self.start()? {
            Evaluation::Ready(outcome) => Ok(outcome),
            Evaluation::Scanning(pending) => pending.wait().await,
        }
    }

    /// Like [`evaluate`](Session::evaluate), without waiting for a binomial scan
    ///
    /// The scan is submitted to the worker, superseding any earlier one, and
    /// the returned [`PendingSolution`] finishes the solution once it lands.
    pub fn start(&mut self) -> Result<Evaluation> {
        let validation = self.validate();
        let Some(parameters) = validation.parameters else {
            debug!(
                family = self.family().as_str(),
                rejected = validation.rejected().count(),
                "Form rejected"
            );
            return Ok(Evaluation::Ready(Outcome::Invalid(validation)));
        };

        let solution = match parameters {
            TestParameters::Binomial(params) => {
                let plan = binomial::plan(&params);
                match plan.request {
                    Some(request) => {
                        let generation = self.worker.submit(request)?;
                        return Ok(Evaluation::Scanning(PendingSolution {
                            plan,
                            ticket: self.worker.ticket(generation),
                        }));
                    }
                    None => Solution::Binomial(plan.resolve(f64::NAN)),
                }
            }
            other => self.evaluator.evaluate(&other)?,
        };

        Ok(Evaluation::Ready(Outcome::Solved(solution)))
    }

    /// Snapshot of the background worker's counters
    pub fn worker_metrics(&self) -> WorkerMetrics {
        self.worker.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypotest_domain::Indeterminate;
    use hypotest_validation::{TiePolicy, INEQUALITY_FIELD};
    use crate::error::CliError;
    use hypotest_worker::{WorkerConfig, WorkerError};

    fn solved(outcome: Outcome) -> Solution {
        match outcome {
            Outcome::Solved(solution) => solution,
            Outcome::Invalid(result) => panic!("Expected a solution, got {:?}", result),
        }
    }

    #[tokio::test]
    async fn test_default_binomial_session() {
        let mut session = Session::new(TestFamily::Binomial, &Config::default()).unwrap();
        let solution = solved(session.evaluate().await.unwrap());

        assert_eq!(solution.decision().reject_null(), Some(false));
        assert_eq!(session.worker_metrics().inline, 1);
    }

    #[tokio::test]
    async fn test_background_scan() {
        let config = Config {
            worker: WorkerConfig::responsive(),
            ..Default::default()
        };
        let mut session = Session::new(TestFamily::Binomial, &config).unwrap();
        session.set("sample-value", "20").unwrap();

        let solution = solved(session.evaluate().await.unwrap());
        assert_eq!(solution.decision().reject_null(), Some(true));

        let metrics = session.worker_metrics();
        assert_eq!(metrics.submitted, 1);
        assert_eq!(metrics.inline, 0);
        assert_eq!(metrics.completed, 1);
    }

    fn scanning(evaluation: Evaluation) -> PendingSolution {
        match evaluation {
            Evaluation::Scanning(pending) => pending,
            Evaluation::Ready(outcome) => panic!("Expected a scan, got {:?}", outcome),
        }
    }

    #[tokio::test]
    async fn test_edit_supersedes_pending_scan() {
        let config = Config {
            worker: WorkerConfig::responsive(),
            ..Default::default()
        };
        let mut session = Session::new(TestFamily::Binomial, &config).unwrap();
        let first = scanning(session.start().unwrap());

        session.set("sample-value", "20").unwrap();
        let second = scanning(session.start().unwrap());
        assert!(second.generation() > first.generation());

        let err = first.wait().await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Worker(WorkerError::Superseded { .. })
        ));

        let solution = solved(second.wait().await.unwrap());
        assert_eq!(solution.decision().reject_null(), Some(true));
        assert_eq!(session.worker_metrics().submitted, 2);
    }

    #[tokio::test]
    async fn test_start_without_scan_is_ready() {
        let mut session = Session::new(TestFamily::Normal, &Config::default()).unwrap();
        match session.start().unwrap() {
            Evaluation::Ready(Outcome::Solved(solution)) => {
                assert_eq!(solution.family(), TestFamily::Normal)
            }
            _ => panic!("Expected a finished normal solution"),
        }
        assert_eq!(session.worker_metrics().submitted, 0);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_computed() {
        let mut session = Session::new(TestFamily::Binomial, &Config::default()).unwrap();
        session.set("sample-size", "forty").unwrap();

        match session.evaluate().await.unwrap() {
            Outcome::Invalid(result) => {
                let names: Vec<_> = result.rejected().map(|r| r.name).collect();
                assert_eq!(names, vec!["sample-size", "sample-value"]);
            }
            Outcome::Solved(s) => panic!("Expected rejection, got {:?}", s),
        }
        assert_eq!(session.worker_metrics().submitted, 0);
    }

    #[tokio::test]
    async fn test_tie_without_scan() {
        let mut config = Config::default();
        config.validation.tie_policy = TiePolicy::Indeterminate;
        let mut session = Session::new(TestFamily::Binomial, &config).unwrap();
        session.set("sample-value", "14").unwrap();
        session.set(INEQUALITY_FIELD, "!=").unwrap();

        let solution = solved(session.evaluate().await.unwrap());
        assert_eq!(
            solution.decision(),
            hypotest_domain::Decision::Indeterminate(Indeterminate::TailTie)
        );
        assert_eq!(session.worker_metrics().submitted, 0);
    }

    #[tokio::test]
    async fn test_switch_family() {
        let mut session = Session::new(TestFamily::Binomial, &Config::default()).unwrap();
        session.set("sample-value", "25").unwrap();
        session.switch(TestFamily::Correlation);

        assert_eq!(session.family(), TestFamily::Correlation);
        assert!(session.set("sample-value", "3").is_err());

        let solution = solved(session.evaluate().await.unwrap());
        assert_eq!(solution.family(), TestFamily::Correlation);
        assert_eq!(solution.decision().reject_null(), Some(true));
    }
}
