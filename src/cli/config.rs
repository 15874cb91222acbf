//! Configuration file
//!
//! ```json
//! { "data_dir": "/var/lib/mydb", "log_level": "info", "strict_grammar": true }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::executor::QueryOptions;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Log level that disables logging entirely
const LOG_LEVEL_OFF: &str = "off";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<table>.meta` and `<table>.data` (default ".")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// trace | info | warn | error | fatal | off (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Require `where` and `=` at their positions (default false)
    #[serde(default)]
    pub strict_grammar: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            strict_grammar: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(CliError::Config("data_dir must not be empty".into()));
        }

        self.min_severity()?;

        Ok(())
    }

    /// Replaces `data_dir` when the command line names one
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Logger threshold; `None` when logging is off
    pub fn min_severity(&self) -> CliResult<Option<Severity>> {
        if self.log_level.eq_ignore_ascii_case(LOG_LEVEL_OFF) {
            return Ok(None);
        }

        Severity::parse(&self.log_level).map(Some).ok_or_else(|| {
            CliError::Config(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error, fatal or off.",
                self.log_level
            ))
        })
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            strict_grammar: self.strict_grammar,
        }
    }
}
