//! Schema error types
//!
//! Error codes:
//! - MYDB_SCHEMA_UNAVAILABLE (FATAL)
//! - MYDB_SCHEMA_MALFORMED (FATAL)

use std::fmt;
use std::io;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Startup cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// `.meta` file missing or unreadable
    MydbSchemaUnavailable,
    /// `.meta` file content does not describe a table
    MydbSchemaMalformed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MydbSchemaUnavailable => "MYDB_SCHEMA_UNAVAILABLE",
            SchemaErrorCode::MydbSchemaMalformed => "MYDB_SCHEMA_MALFORMED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal // Schema errors always end startup
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with context
#[derive(Debug)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Table whose schema failed to load
    table: String,
    /// Human-readable message
    message: String,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl SchemaError {
    /// Schema file could not be opened or read
    pub fn unavailable(table: impl Into<String>, source: io::Error) -> Self {
        let table = table.into();
        Self {
            code: SchemaErrorCode::MydbSchemaUnavailable,
            message: format!("couldn't open data file '{}'", table),
            table,
            source: Some(source),
        }
    }

    /// Schema file content is invalid
    pub fn malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            code: SchemaErrorCode::MydbSchemaMalformed,
            message: format!("malformed meta-data for table '{}': {}", table, reason.into()),
            table,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
