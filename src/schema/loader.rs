//! Schema loader for `<table>.meta` files
//!
//! The meta file is a stream of whitespace-separated tokens:
//!
//! ```text
//! recordSize numColumns (columnName isIndexedFlag)+
//! ```
//!
//! where `isIndexedFlag` is `0` or `1`. A missing or malformed meta file is
//! fatal at startup.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::TableSchema;

/// Loads table schemas from a data directory.
pub struct SchemaLoader {
    /// Directory holding `.meta` and `.data` files
    data_dir: PathBuf,
}

impl SchemaLoader {
    /// Creates a loader for the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Returns the path of `<table>.meta`.
    pub fn meta_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{}.meta", table))
    }

    /// Loads and validates the schema of `table`.
    pub fn load(&self, table: &str) -> SchemaResult<TableSchema> {
        let bytes = fs::read(self.meta_path(table))
            .map_err(|e| SchemaError::unavailable(table, e))?;

        let content = String::from_utf8(bytes)
            .map_err(|e| SchemaError::malformed(table, format!("invalid UTF-8: {}", e)))?;

        Self::parse(table, &content)
    }

    /// Parses meta file content into a validated schema.
    pub fn parse(table: &str, content: &str) -> SchemaResult<TableSchema> {
        let mut tokens = content.split_whitespace();

        let record_size: u64 = parse_number(table, tokens.next(), "record size")?;
        let num_columns: usize = parse_number(table, tokens.next(), "column count")?;

        let mut columns = Vec::new();
        while let Some(name) = tokens.next() {
            let indexed = match tokens.next() {
                Some("1") => true,
                Some("0") => false,
                Some(other) => {
                    return Err(SchemaError::malformed(
                        table,
                        format!("index flag for column '{}' must be 0 or 1, got '{}'", name, other),
                    ))
                }
                None => {
                    return Err(SchemaError::malformed(
                        table,
                        format!("column '{}' has no index flag", name),
                    ))
                }
            };
            columns.push((name, indexed));
        }

        if columns.len() != num_columns {
            return Err(SchemaError::malformed(
                table,
                format!(
                    "declares {} columns but lists {}",
                    num_columns,
                    columns.len()
                ),
            ));
        }

        let schema = TableSchema::new(table, record_size, columns);
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(table, e))?;

        Ok(schema)
    }
}

fn parse_number<T: std::str::FromStr>(
    table: &str,
    token: Option<&str>,
    what: &str,
) -> SchemaResult<T> {
    let token = token.ok_or_else(|| SchemaError::malformed(table, format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| SchemaError::malformed(table, format!("invalid {} '{}'", what, token)))
}
