//! Executor error types
//!
//! Error codes:
//! - MYDB_EXECUTION_FAILED (ERROR)
//! - MYDB_RECORD_READ_FAILED (ERROR)
//!
//! Both end the current query only.

use std::fmt;

use crate::storage::StorageError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query failed but the session continues
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Plan could not be carried out against the loaded table
    MydbExecutionFailed,
    /// Storage failed while matching or fetching records
    MydbRecordReadFailed,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::MydbExecutionFailed => "MYDB_EXECUTION_FAILED",
            ExecutorErrorCode::MydbRecordReadFailed => "MYDB_RECORD_READ_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Underlying storage failure
    source: Option<StorageError>,
}

impl ExecutorError {
    /// Create an execution failed error
    pub fn execution_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::MydbExecutionFailed,
            message: reason.into(),
            source: None,
        }
    }

    /// Wrap a storage failure
    pub fn storage(err: StorageError) -> Self {
        Self {
            code: ExecutorErrorCode::MydbRecordReadFailed,
            message: err.message().to_string(),
            source: Some(err),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
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

    /// Returns the storage failure, if this error wraps one
    pub fn storage_error(&self) -> Option<&StorageError> {
        self.source.as_ref()
    }

    /// Returns the record offset, if the failure concerns one record
    pub fn offset(&self) -> Option<u64> {
        self.source.as_ref().and_then(StorageError::offset)
    }

    /// Returns the line shown to the user
    pub fn diagnostic(&self) -> String {
        format!("**Error: {}", self.message)
    }
}

impl From<StorageError> for ExecutorError {
    fn from(err: StorageError) -> Self {
        Self::storage(err)
    }
}

impl fmt::Display for ExecutorError {
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

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
