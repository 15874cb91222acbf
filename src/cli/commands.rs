//! CLI entry point
//!
//! Boot order:
//! 1. Parse arguments
//! 2. Load and validate configuration
//! 3. Set the log threshold
//! 4. Run the interactive session on stdin/stdout

use std::io;

use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Cli;
use super::config::Config;
use super::errors::CliResult;
use super::session::{Session, SessionOutcome};

/// Parse arguments and run one session
pub fn run() -> CliResult<SessionOutcome> {
    let cli = Cli::parse_args();
    run_with(cli)
}

/// Run one session for already parsed arguments
pub fn run_with(cli: Cli) -> CliResult<SessionOutcome> {
    let config = load_config(&cli)?;
    Logger::set_min_severity(config.min_severity()?);

    let data_dir = config.data_dir.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", data_dir.as_str()),
            ("log_level", config.log_level.as_str()),
            ("strict_grammar", if config.strict_grammar { "true" } else { "false" }),
        ],
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        config.data_dir.clone(),
        config.query_options(),
    );

    session.run(cli.table.as_deref())
}

/// Config file if given, else defaults; `--data-dir` wins over both
fn load_config(cli: &Cli) -> CliResult<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Ok(config.with_data_dir(cli.data_dir.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let cli = Cli::try_parse_from(["mydb"]).unwrap();
        assert_eq!(load_config(&cli).unwrap(), Config::default());
    }

    #[test]
    fn test_data_dir_flag_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mydb.json");
        fs::write(&path, r#"{"data_dir": "/from/file", "strict_grammar": true}"#).unwrap();

        let cli = Cli::try_parse_from([
            "mydb",
            "--config",
            path.to_str().unwrap(),
            "--data-dir",
            "/from/flag",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
        assert!(config.strict_grammar);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mydb.json");
        fs::write(&path, "not json").unwrap();

        let cli = Cli::try_parse_from(["mydb", "--config", path.to_str().unwrap()]).unwrap();
        assert_eq!(load_config(&cli).unwrap_err().code(), "MYDB_CLI_CONFIG_ERROR");
    }
}
