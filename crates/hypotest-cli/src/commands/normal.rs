//! Normal command implementation.

use crate::cli::NormalArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hypotest_domain::TestFamily;

/// Execute the normal command.
pub async fn execute_normal(
    args: NormalArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let outcome = super::solve(TestFamily::Normal, &args, config).await?;
    super::report(&outcome, formatter)
}
