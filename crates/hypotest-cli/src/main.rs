//! Hypotest CLI - Worked solutions for hypothesis tests.

use clap::Parser;
use hypotest_cli::commands;
use hypotest_cli::repl;
use hypotest_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> hypotest_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config; an explicit path must parse, the default one falls back
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable configuration");
            Config::default()
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled, config.settings.precision);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &formatter).await?;
        }
        Some(Command::Binomial(args)) => {
            commands::execute_binomial(args, &config, &formatter).await?;
        }
        Some(Command::Normal(args)) => {
            commands::execute_normal(args, &config, &formatter).await?;
        }
        Some(Command::Correlation(args)) => {
            commands::execute_correlation(args, &config, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr, `RUST_LOG` or `warn` by default, `debug` with --verbose
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
