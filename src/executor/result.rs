//! Result types for query execution

use std::fmt;

use crate::index::RecordOffset;
use crate::planner::AccessPath;

/// One projected column value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultField {
    /// Column name
    pub column: String,
    /// Column value
    pub value: String,
}

impl ResultField {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ResultField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.column, self.value)
    }
}

/// Projected fields of one matching record, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Offset of the record in the data file
    pub offset: RecordOffset,
    /// Projected fields
    pub fields: Vec<ResultField>,
}

/// Result of query execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Access path that produced the match set
    pub access: AccessPath,
    /// Rows in match order
    pub rows: Vec<ResultRow>,
}

impl ExecutionResult {
    /// Creates a result with no matches
    pub fn empty(access: AccessPath) -> Self {
        Self {
            access,
            rows: Vec::new(),
        }
    }

    /// Returns true if no record matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of matching records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Offsets of the matching records, in match order
    pub fn offsets(&self) -> impl Iterator<Item = RecordOffset> + '_ {
        self.rows.iter().map(|row| row.offset)
    }

    /// Output lines, `name: value`, in match order then schema order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.fields.iter().map(ToString::to_string))
    }
}
