//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use hypotest_validation::INEQUALITY_FIELD;
use std::path::PathBuf;

/// Hypotest - Worked solutions for binomial, normal and correlation hypothesis tests.
#[derive(Debug, Parser)]
#[command(name = "hypotest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HYPOTEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Worked solution, one step per row (default)
    Steps,
    /// JSON format
    Json,
    /// Quiet format (verdict only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Steps => OutputFormat::Steps,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Binomial test of a proportion
    Binomial(BinomialArgs),

    /// Normal test of a mean with known standard deviation
    Normal(NormalArgs),

    /// Test of the product moment correlation coefficient
    Correlation(CorrelationArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Alternative hypothesis, shared by every test
#[derive(Debug, Clone, Default, Args)]
pub struct AlternativeArg {
    /// Alternative hypothesis: <, > or != (also less, greater, not-equal)
    #[arg(short, long, allow_hyphen_values = true)]
    pub alternative: Option<String>,
}

/// Arguments for the binomial command.
///
/// Values are kept as raw text so invalid input is reported field by field
/// instead of being refused by the argument parser.
#[derive(Debug, Clone, Default, Args)]
pub struct BinomialArgs {
    /// Proportion p under H₀
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub test_value: Option<String>,

    /// Significance level α
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub significance: Option<String>,

    /// Number of trials n
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub sample_size: Option<String>,

    /// Observed number of successes x
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    pub sample_value: Option<String>,

    #[command(flatten)]
    pub alternative: AlternativeArg,
}

/// Arguments for the normal command.
#[derive(Debug, Clone, Default, Args)]
pub struct NormalArgs {
    /// Significance level α
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub significance: Option<String>,

    /// Sample size n
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub sample_size: Option<String>,

    /// Observed sample mean
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    pub sample_mean: Option<String>,

    /// Population mean μ under H₀
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    pub mean: Option<String>,

    /// Population standard deviation σ
    #[arg(short = 'd', long, allow_hyphen_values = true)]
    pub std_dev: Option<String>,

    #[command(flatten)]
    pub alternative: AlternativeArg,
}

/// Arguments for the correlation command.
#[derive(Debug, Clone, Default, Args)]
pub struct CorrelationArgs {
    /// Significance level α
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub significance: Option<String>,

    /// Number of data pairs n
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub sample_size: Option<String>,

    /// Sample product moment correlation coefficient r
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub pmcc: Option<String>,

    #[command(flatten)]
    pub alternative: AlternativeArg,
}

/// Field edits carried by a subcommand, as `(field name, raw text)` pairs
pub trait FieldAssignments {
    /// Edits to apply on top of the form defaults, in argument order
    fn assignments(&self) -> Vec<(&'static str, String)>;
}

fn collect(pairs: &[(&'static str, &Option<String>)]) -> Vec<(&'static str, String)> {
    pairs
        .iter()
        .filter_map(|(name, raw)| raw.as_ref().map(|raw| (*name, raw.clone())))
        .collect()
}

impl FieldAssignments for BinomialArgs {
    fn assignments(&self) -> Vec<(&'static str, String)> {
        collect(&[
            ("test-value", &self.test_value),
            ("significance", &self.significance),
            ("sample-size", &self.sample_size),
            ("sample-value", &self.sample_value),
            (INEQUALITY_FIELD, &self.alternative.alternative),
        ])
    }
}

impl FieldAssignments for NormalArgs {
    fn assignments(&self) -> Vec<(&'static str, String)> {
        collect(&[
            ("significance", &self.significance),
            ("sample-size", &self.sample_size),
            ("sample-mean", &self.sample_mean),
            ("mean", &self.mean),
            ("std-dev", &self.std_dev),
            (INEQUALITY_FIELD, &self.alternative.alternative),
        ])
    }
}

impl FieldAssignments for CorrelationArgs {
    fn assignments(&self) -> Vec<(&'static str, String)> {
        collect(&[
            ("significance", &self.significance),
            ("sample-size", &self.sample_size),
            ("pmcc", &self.pmcc),
            (INEQUALITY_FIELD, &self.alternative.alternative),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_repl() {
        let cli = Cli::try_parse_from(["hypotest"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_binomial_arguments() {
        let cli = Cli::try_parse_from([
            "hypotest", "binomial", "-n", "40", "-x", "20", "--alternative", "!=",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Binomial(args)) => {
                assert_eq!(
                    args.assignments(),
                    vec![
                        ("sample-size", "40".to_string()),
                        ("sample-value", "20".to_string()),
                        (INEQUALITY_FIELD, "!=".to_string()),
                    ]
                );
            }
            other => panic!("Expected binomial command, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_values_are_accepted_as_text() {
        let cli =
            Cli::try_parse_from(["hypotest", "correlation", "-r", "-0.42", "-a", "<"]).unwrap();

        match cli.command {
            Some(Command::Correlation(args)) => {
                assert_eq!(args.pmcc.as_deref(), Some("-0.42"));
                assert_eq!(args.alternative.alternative.as_deref(), Some("<"));
            }
            other => panic!("Expected correlation command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "hypotest", "normal", "--format", "json", "--no-color", "-v",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(matches!(OutputFormat::from(CliFormat::Json), OutputFormat::Json));
    }

    #[test]
    fn test_unset_fields_are_skipped() {
        let args = NormalArgs {
            mean: Some("65".to_string()),
            ..Default::default()
        };
        assert_eq!(args.assignments(), vec![("mean", "65".to_string())]);
    }
}
