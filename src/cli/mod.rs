//! CLI module for mydb
//!
//! Provides:
//! - Argument parsing and the optional JSON configuration file
//! - The interactive table/query session on stdin/stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod session;

pub use args::Cli;
pub use commands::{run, run_with};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{prompt, read_line};
pub use session::{Session, SessionOutcome};
