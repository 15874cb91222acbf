//! Storage error types
//!
//! Error codes:
//! - MYDB_DATA_FILE_UNAVAILABLE (ERROR) - degrades an index build
//! - MYDB_STORAGE_READ_FAILED (ERROR)
//! - MYDB_MALFORMED_RECORD (ERROR)
//! - MYDB_INVALID_OFFSET (ERROR)
//! - MYDB_INVALID_COLUMN (ERROR)
//! - MYDB_INVALID_LAYOUT (ERROR)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, session continues
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Data file missing or unopenable
    MydbDataFileUnavailable,
    /// Seek or read failure on an open data file
    MydbStorageReadFailed,
    /// Record content does not hold one token per column
    MydbMalformedRecord,
    /// Offset is not a record start inside the file
    MydbInvalidOffset,
    /// Column position outside the record
    MydbInvalidColumn,
    /// Record size or column count of zero
    MydbInvalidLayout,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::MydbDataFileUnavailable => "MYDB_DATA_FILE_UNAVAILABLE",
            StorageErrorCode::MydbStorageReadFailed => "MYDB_STORAGE_READ_FAILED",
            StorageErrorCode::MydbMalformedRecord => "MYDB_MALFORMED_RECORD",
            StorageErrorCode::MydbInvalidOffset => "MYDB_INVALID_OFFSET",
            StorageErrorCode::MydbInvalidColumn => "MYDB_INVALID_COLUMN",
            StorageErrorCode::MydbInvalidLayout => "MYDB_INVALID_LAYOUT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error type with context
#[derive(Debug)]
pub struct StorageError {
    /// Error code
    code: StorageErrorCode,
    /// Human-readable message
    message: String,
    /// Record offset if applicable
    offset: Option<u64>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl StorageError {
    /// Data file could not be opened
    pub fn data_file_unavailable(path: impl fmt::Display, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::MydbDataFileUnavailable,
            message: format!("couldn't open data file '{}'", path),
            offset: None,
            source: Some(source),
        }
    }

    /// Seek, read or metadata failure
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::MydbStorageReadFailed,
            message: message.into(),
            offset: None,
            source: Some(source),
        }
    }

    /// Record at `offset` could not be split into its columns
    pub fn malformed_record(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::MydbMalformedRecord,
            message: format!("malformed record at offset {}: {}", offset, reason.into()),
            offset: Some(offset),
            source: None,
        }
    }

    /// Offset does not address a record
    pub fn invalid_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::MydbInvalidOffset,
            message: format!("invalid record offset {}: {}", offset, reason.into()),
            offset: Some(offset),
            source: None,
        }
    }

    /// 1-based column number outside `1..=num_columns`
    pub fn invalid_column(column_number: usize, num_columns: usize) -> Self {
        Self {
            code: StorageErrorCode::MydbInvalidColumn,
            message: format!(
                "column {} out of range for records with {} columns",
                column_number, num_columns
            ),
            offset: None,
            source: None,
        }
    }

    /// Record layout cannot address any record
    pub fn invalid_layout(record_size: u64, num_columns: usize) -> Self {
        Self {
            code: StorageErrorCode::MydbInvalidLayout,
            message: format!(
                "invalid record layout: size {} bytes, {} columns",
                record_size, num_columns
            ),
            offset: None,
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
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

    /// Returns the record offset if applicable
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns true if the data file itself could not be opened
    pub fn is_unavailable(&self) -> bool {
        self.code == StorageErrorCode::MydbDataFileUnavailable
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
