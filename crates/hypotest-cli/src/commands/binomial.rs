//! Binomial command implementation.

use crate::cli::BinomialArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hypotest_domain::TestFamily;

/// Execute the binomial command.
pub async fn execute_binomial(
    args: BinomialArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let outcome = super::solve(TestFamily::Binomial, &args, config).await?;
    super::report(&outcome, formatter)
}
