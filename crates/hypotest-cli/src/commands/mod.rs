//! Command implementations.

pub mod binomial;
pub mod correlation;
pub mod normal;

pub use self::binomial::execute_binomial;
pub use self::correlation::execute_correlation;
pub use self::normal::execute_normal;

use crate::cli::FieldAssignments;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{Outcome, Session};
use hypotest_domain::TestFamily;

/// Evaluate the default form of `family` with the given edits applied.
pub async fn solve<A: FieldAssignments>(
    family: TestFamily,
    args: &A,
    config: &Config,
) -> Result<Outcome> {
    let mut session = Session::new(family, config)?;
    for (name, raw) in args.assignments() {
        session.set(name, &raw)?;
    }
    session.evaluate().await
}

/// Print an outcome; an invalid form becomes an error after its report.
fn report(outcome: &Outcome, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_outcome(outcome)?);

    match outcome {
        Outcome::Solved(_) => Ok(()),
        Outcome::Invalid(result) => Err(CliError::InvalidInput(format!(
            "{} field(s) rejected",
            result.rejected().count()
        ))),
    }
}
