//! Hypotest CLI library.
//!
//! This library provides the terminal front-end for the hypothesis-test
//! engine: argument parsing, configuration, the editable test session,
//! one-shot commands, the interactive REPL and worked-solution formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::{Evaluation, Outcome, PendingSolution, Session};
