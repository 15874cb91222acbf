//! Table schema types
//!
//! A table is a fixed record size plus an ordered list of columns. Column
//! positions are 0-based ordinals into each record's tokens.

use std::collections::HashSet;

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,
    /// 0-based position within a record
    pub ordinal: usize,
    /// Whether an index is built for this column at startup
    pub indexed: bool,
}

impl ColumnSchema {
    /// Creates a column definition
    pub fn new(name: impl Into<String>, ordinal: usize, indexed: bool) -> Self {
        Self {
            name: name.into(),
            ordinal,
            indexed,
        }
    }

    /// 1-based position, as used by linear scans
    pub fn column_number(&self) -> usize {
        self.ordinal + 1
    }
}

/// Immutable description of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name, also the stem of the `.meta` and `.data` files
    table_name: String,
    /// Byte size of every record in the data file
    record_size: u64,
    /// Columns in record order
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Creates a schema from `(name, indexed)` pairs in record order.
    pub fn new<I, N>(table_name: impl Into<String>, record_size: u64, columns: I) -> Self
    where
        I: IntoIterator<Item = (N, bool)>,
        N: Into<String>,
    {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(ordinal, (name, indexed))| ColumnSchema::new(name, ordinal, indexed))
            .collect();

        Self {
            table_name: table_name.into(),
            record_size,
            columns,
        }
    }

    /// Validates the schema structure.
    ///
    /// Record size must be positive, there must be at least one column,
    /// column names must be unique and ordinals must match positions.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.table_name.is_empty() {
            return Err("table name must not be empty".into());
        }
        if self.record_size == 0 {
            return Err("record size must be greater than zero".into());
        }
        if self.columns.is_empty() {
            return Err("table must declare at least one column".into());
        }

        let mut seen = HashSet::new();
        for (position, column) in self.columns.iter().enumerate() {
            if column.ordinal != position {
                return Err(format!(
                    "column '{}' has ordinal {} at position {}",
                    column.name, column.ordinal, position
                ));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(format!("duplicate column name '{}'", column.name));
            }
        }

        Ok(())
    }

    /// Returns the table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the record size in bytes
    pub fn record_size(&self) -> u64 {
        self.record_size
    }

    /// Returns the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the columns in record order
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Looks up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Checks if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns flagged for indexing, in record order
    pub fn indexed_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.indexed)
    }
}
