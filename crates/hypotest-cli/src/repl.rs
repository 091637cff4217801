//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Every `set` revalidates the form and recomputes the worked solution.
//! Binomial scans finish in the background; an edit made before one lands
//! replaces it, and only the newest solution is printed.

use crate::config::{self, Config};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{Evaluation, PendingSolution, Session};
use anyhow::Context;
use hypotest_domain::TestFamily;
use hypotest_worker::WorkerError;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Hypotest REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = Session::new(TestFamily::Binomial, config)?;
    let mut render = PendingRender::default();

    loop {
        let prompt = format!("hypotest ({})> ", session.family().as_str());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(command) => {
                        if let Err(e) =
                            execute_repl_command(command, &mut session, formatter, &mut render)
                        {
                            eprintln!("{}", formatter.error(&format!("{:#}", e)));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    render.supersede();

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Use(TestFamily),
    Set { field: String, raw: String },
    Show,
    Fields,
    Solve,
    Metrics,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" => Ok(ReplCommand::Show),
        "fields" => Ok(ReplCommand::Fields),
        "solve" => Ok(ReplCommand::Solve),
        "metrics" => Ok(ReplCommand::Metrics),
        "use" => TestFamily::parse(rest).map(ReplCommand::Use).ok_or_else(|| {
            CliError::InvalidInput(
                "Usage: use <binomial|normal|correlation>".to_string(),
            )
        }),
        "set" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let field = args.next().unwrap_or_default();
            if field.is_empty() {
                return Err(CliError::InvalidInput(
                    "Usage: set <field> <value>".to_string(),
                ));
            }
            // Empty text is a legitimate (invalid) input, not a usage error
            let raw = args.next().unwrap_or_default().trim();
            Ok(ReplCommand::Set {
                field: field.to_string(),
                raw: raw.to_string(),
            })
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        ))),
    }
}

/// Execute a REPL command.
fn execute_repl_command(
    command: ReplCommand,
    session: &mut Session,
    formatter: &Formatter,
    render: &mut PendingRender,
) -> anyhow::Result<()> {
    match command {
        ReplCommand::Use(family) => {
            session.switch(family);
            println!(
                "{}",
                formatter.success(&format!("Switched to the {} test", family.as_str()))
            );
            solve(session, formatter, render)?;
        }
        ReplCommand::Set { field, raw } => {
            session
                .set(&field, &raw)
                .with_context(|| format!("Could not set '{}'", field))?;
            solve(session, formatter, render)?;
        }
        ReplCommand::Show => {
            let result = session.validate();
            println!("{}", formatter.format_form(session.form(), &result));
        }
        ReplCommand::Fields => {
            println!("{}", formatter.format_fields(session.form()));
        }
        ReplCommand::Solve => solve(session, formatter, render)?,
        ReplCommand::Metrics => {
            println!("{}", session.worker_metrics().summary());
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn solve(
    session: &mut Session,
    formatter: &Formatter,
    render: &mut PendingRender,
) -> anyhow::Result<()> {
    render.supersede();
    let evaluation = session
        .start()
        .with_context(|| format!("Evaluating the {} test failed", session.family().as_str()))?;
    match evaluation {
        Evaluation::Ready(outcome) => println!("{}", formatter.format_outcome(&outcome)?),
        Evaluation::Scanning(pending) => render.spawn(pending, formatter.clone()),
    }
    Ok(())
}

/// Prints the binomial solution whose scan is in flight
#[derive(Default)]
struct PendingRender {
    task: Option<JoinHandle<()>>,
}

impl PendingRender {
    /// Wait for `pending` in the background, replacing any earlier wait
    fn spawn(&mut self, pending: PendingSolution, formatter: Formatter) {
        self.supersede();
        self.task = Some(tokio::spawn(async move {
            let generation = pending.generation();
            match pending.wait().await {
                Ok(outcome) => match formatter.format_outcome(&outcome) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                },
                Err(CliError::Worker(WorkerError::Superseded { .. })) => {
                    tracing::debug!(generation, "Dropping superseded solution");
                }
                Err(e) => eprintln!(
                    "{}",
                    formatter.error(&format!("Evaluating the binomial test failed: {}", e))
                ),
            }
        }));
    }

    /// Stop waiting for the solution in flight, if any
    fn supersede(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  use <family>         - Start a binomial, normal or correlation test");
    println!("  set <field> <value>  - Change one input and recompute");
    println!("  set alternative <op> - Change the alternative hypothesis (<, >, !=)");
    println!("  solve                - Recompute the current test");
    println!("  show                 - Show every input and whether it is valid");
    println!("  fields               - List the field names of the current test");
    println!("  metrics              - Show background scan counters");
    println!("  help, ?              - Show this help");
    println!("  exit, quit, q        - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypotest_worker::WorkerConfig;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_repl_command("show").unwrap(), ReplCommand::Show);
        assert_eq!(parse_repl_command("metrics").unwrap(), ReplCommand::Metrics);
    }

    #[test]
    fn test_parse_use() {
        assert_eq!(
            parse_repl_command("use pmcc").unwrap(),
            ReplCommand::Use(TestFamily::Correlation)
        );
        assert!(parse_repl_command("use").is_err());
        assert!(parse_repl_command("use poisson").is_err());
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_repl_command("set sample-size  40 ").unwrap(),
            ReplCommand::Set {
                field: "sample-size".to_string(),
                raw: "40".to_string(),
            }
        );
        assert_eq!(
            parse_repl_command("set alternative !=").unwrap(),
            ReplCommand::Set {
                field: "alternative".to_string(),
                raw: "!=".to_string(),
            }
        );
    }

    #[test]
    fn test_set_keeps_empty_and_spaced_text() {
        assert_eq!(
            parse_repl_command("set pmcc").unwrap(),
            ReplCommand::Set {
                field: "pmcc".to_string(),
                raw: String::new(),
            }
        );
        assert_eq!(
            parse_repl_command("set mean 6 5").unwrap(),
            ReplCommand::Set {
                field: "mean".to_string(),
                raw: "6 5".to_string(),
            }
        );
        assert!(parse_repl_command("set").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_repl_command("frobnicate now").unwrap_err();
        assert!(err.to_string().contains("Unknown command: frobnicate"));
    }

    fn quiet() -> Formatter {
        Formatter::new(crate::config::OutputFormat::Quiet, false, 4)
    }

    fn set(field: &str, raw: &str) -> ReplCommand {
        ReplCommand::Set {
            field: field.to_string(),
            raw: raw.to_string(),
        }
    }

    #[tokio::test]
    async fn test_set_unknown_field_reports_context() {
        let mut session = Session::new(TestFamily::Normal, &Config::default()).unwrap();
        let mut render = PendingRender::default();

        let err = execute_repl_command(set("pmcc", "0.5"), &mut session, &quiet(), &mut render)
            .unwrap_err();
        assert!(format!("{:#}", err).starts_with("Could not set 'pmcc'"));
        assert!(render.task.is_none());
    }

    #[tokio::test]
    async fn test_scan_renders_in_background() {
        let config = Config {
            worker: WorkerConfig::responsive(),
            ..Default::default()
        };
        let mut session = Session::new(TestFamily::Binomial, &config).unwrap();
        let mut render = PendingRender::default();
        let formatter = quiet();

        execute_repl_command(set("sample-value", "20"), &mut session, &formatter, &mut render)
            .unwrap();
        execute_repl_command(set("sample-value", "21"), &mut session, &formatter, &mut render)
            .unwrap();
        assert_eq!(session.worker_metrics().submitted, 2);

        let latest = render.task.take().unwrap();
        assert!(latest.await.is_ok());
    }

    #[tokio::test]
    async fn test_switch_drops_pending_render() {
        let config = Config {
            worker: WorkerConfig::responsive(),
            ..Default::default()
        };
        let mut session = Session::new(TestFamily::Binomial, &config).unwrap();
        let mut render = PendingRender::default();
        let formatter = quiet();

        execute_repl_command(ReplCommand::Solve, &mut session, &formatter, &mut render).unwrap();
        assert!(render.task.is_some());

        execute_repl_command(
            ReplCommand::Use(TestFamily::Normal),
            &mut session,
            &formatter,
            &mut render,
        )
        .unwrap();
        assert!(render.task.is_none());
    }
}
