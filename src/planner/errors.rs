//! Planner error types
//!
//! Error codes:
//! - MYDB_UNKNOWN_QUERY (REJECT)
//! - MYDB_INVALID_SELECT_COLUMN (REJECT)
//! - MYDB_INVALID_SELECT_QUERY (REJECT)
//! - MYDB_INVALID_TABLE_NAME (REJECT)
//! - MYDB_INVALID_WHERE_COLUMN (REJECT)
//!
//! A rejection ends the current query only; the session keeps reading.

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// First token is not `select`
    MydbUnknownQuery,
    /// Projection is neither `*` nor a known column
    MydbInvalidSelectColumn,
    /// Structural keyword missing or misplaced
    MydbInvalidSelectQuery,
    /// Table name differs from the loaded table
    MydbInvalidTableName,
    /// Predicate column is not a known column
    MydbInvalidWhereColumn,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::MydbUnknownQuery => "MYDB_UNKNOWN_QUERY",
            PlannerErrorCode::MydbInvalidSelectColumn => "MYDB_INVALID_SELECT_COLUMN",
            PlannerErrorCode::MydbInvalidSelectQuery => "MYDB_INVALID_SELECT_QUERY",
            PlannerErrorCode::MydbInvalidTableName => "MYDB_INVALID_TABLE_NAME",
            PlannerErrorCode::MydbInvalidWhereColumn => "MYDB_INVALID_WHERE_COLUMN",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }

    /// Returns the line shown to the user for this rejection
    pub fn diagnostic(&self) -> &'static str {
        match self {
            PlannerErrorCode::MydbUnknownQuery => "Unknown query, ignored...",
            PlannerErrorCode::MydbInvalidSelectColumn => "Invalid select column, ignored...",
            PlannerErrorCode::MydbInvalidSelectQuery => "Invalid select query, ignored...",
            PlannerErrorCode::MydbInvalidTableName => "Invalid table name, ignored...",
            PlannerErrorCode::MydbInvalidWhereColumn => "Invalid where column, ignored...",
        }
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    /// Error code
    code: PlannerErrorCode,
    /// Human-readable message
    message: String,
    /// Offending token, if one was present
    token: Option<String>,
}

impl PlannerError {
    fn new(code: PlannerErrorCode, message: String, token: Option<&str>) -> Self {
        Self {
            code,
            message,
            token: token.map(str::to_string),
        }
    }

    /// Create an unknown query error
    pub fn unknown_query(token: Option<&str>) -> Self {
        Self::new(
            PlannerErrorCode::MydbUnknownQuery,
            format!("expected '{}', found {}", super::ast::SELECT, describe(token)),
            token,
        )
    }

    /// Create an invalid select column error
    pub fn invalid_select_column(token: Option<&str>) -> Self {
        Self::new(
            PlannerErrorCode::MydbInvalidSelectColumn,
            format!("select column {} is not a column of the table", describe(token)),
            token,
        )
    }

    /// Create an invalid select query error
    pub fn invalid_select_query(reason: impl Into<String>, token: Option<&str>) -> Self {
        Self::new(PlannerErrorCode::MydbInvalidSelectQuery, reason.into(), token)
    }

    /// Create an invalid table name error
    pub fn invalid_table_name(token: Option<&str>, expected: &str) -> Self {
        Self::new(
            PlannerErrorCode::MydbInvalidTableName,
            format!("expected table '{}', found {}", expected, describe(token)),
            token,
        )
    }

    /// Create an invalid where column error
    pub fn invalid_where_column(token: Option<&str>) -> Self {
        Self::new(
            PlannerErrorCode::MydbInvalidWhereColumn,
            format!("where column {} is not a column of the table", describe(token)),
            token,
        )
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the line shown to the user
    pub fn diagnostic(&self) -> &'static str {
        self.code.diagnostic()
    }
}

fn describe(token: Option<&str>) -> String {
    match token {
        Some(t) => format!("'{}'", t),
        None => "end of query".to_string(),
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlannerErrorCode::MydbUnknownQuery.code(), "MYDB_UNKNOWN_QUERY");
        assert_eq!(
            PlannerErrorCode::MydbInvalidSelectColumn.code(),
            "MYDB_INVALID_SELECT_COLUMN"
        );
        assert_eq!(
            PlannerErrorCode::MydbInvalidWhereColumn.code(),
            "MYDB_INVALID_WHERE_COLUMN"
        );
    }

    #[test]
    fn test_diagnostics() {
        assert_eq!(
            PlannerError::unknown_query(Some("insert")).diagnostic(),
            "Unknown query, ignored..."
        );
        assert_eq!(
            PlannerError::invalid_table_name(Some("u"), "t").diagnostic(),
            "Invalid table name, ignored..."
        );
        assert_eq!(
            PlannerError::invalid_select_query("missing 'from'", None).diagnostic(),
            "Invalid select query, ignored..."
        );
    }

    #[test]
    fn test_error_display() {
        let err = PlannerError::invalid_where_column(Some("age"));
        let display = format!("{}", err);
        assert!(display.starts_with("[REJECT] MYDB_INVALID_WHERE_COLUMN"));
        assert!(display.contains("'age'"));
        assert_eq!(err.token(), Some("age"));
    }

    #[test]
    fn test_missing_token_message() {
        let err = PlannerError::invalid_select_column(None);
        assert!(err.message().contains("end of query"));
        assert_eq!(err.token(), None);
    }
}
