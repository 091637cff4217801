//! Correlation command implementation.

use crate::cli::CorrelationArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hypotest_domain::TestFamily;

/// Execute the correlation command.
pub async fn execute_correlation(
    args: CorrelationArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let outcome = super::solve(TestFamily::Correlation, &args, config).await?;
    super::report(&outcome, formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AlternativeArg;
    use crate::session::Outcome;

    #[tokio::test]
    async fn test_negative_correlation() {
        let args = CorrelationArgs {
            sample_size: Some("20".to_string()),
            pmcc: Some("-0.41".to_string()),
            alternative: AlternativeArg {
                alternative: Some("<".to_string()),
            },
            ..Default::default()
        };

        match super::super::solve(TestFamily::Correlation, &args, &Config::default())
            .await
            .unwrap()
        {
            Outcome::Solved(solution) => {
                assert_eq!(solution.decision().reject_null(), Some(true));
            }
            Outcome::Invalid(result) => panic!("Unexpected rejection: {:?}", result),
        }
    }

    #[tokio::test]
    async fn test_too_few_pairs() {
        let args = CorrelationArgs {
            sample_size: Some("2".to_string()),
            ..Default::default()
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Steps, false, 4);

        let result = execute_correlation(args, &Config::default(), &formatter).await;
        assert!(result.is_err());
    }
}
