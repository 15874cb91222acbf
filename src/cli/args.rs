//! CLI argument definitions using clap
//!
//! - mydb [--config <path>] [--data-dir <dir>] [--table <name>]
//!
//! With no flags the session runs against the current directory and asks
//! for the table name.

use clap::Parser;
use std::path::PathBuf;

/// myDB - indexed fixed-record tables with a select-only query prompt
#[derive(Parser, Debug)]
#[command(name = "mydb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding `<table>.meta` and `<table>.data`; overrides the config
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Table to open without prompting for it
    #[arg(long)]
    pub table: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
