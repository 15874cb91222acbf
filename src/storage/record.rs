//! Fixed-size record slots
//!
//! A record's bytes are split into column tokens on ASCII whitespace and NUL
//! padding. Only the bytes of the record's own slot are examined, so a short
//! record can never borrow tokens from its neighbour.

use super::errors::{StorageError, StorageResult};

/// One record of a data file, split into its column values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Offset of the record start in the data file
    offset: u64,
    /// Column values in schema order
    values: Vec<String>,
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\0'
}

impl Record {
    /// Creates a record from already split values
    pub fn new(offset: u64, values: Vec<String>) -> Self {
        Self { offset, values }
    }

    /// Parses the slot bytes read at `offset` into exactly `num_columns`
    /// values. Tokens past the last column are ignored.
    pub fn parse(offset: u64, slot: &[u8], num_columns: usize) -> StorageResult<Self> {
        let text = std::str::from_utf8(slot).map_err(|e| {
            StorageError::malformed_record(offset, format!("invalid UTF-8: {}", e))
        })?;

        let values: Vec<String> = text
            .split(is_separator)
            .filter(|token| !token.is_empty())
            .take(num_columns)
            .map(str::to_owned)
            .collect();

        if values.len() < num_columns {
            return Err(StorageError::malformed_record(
                offset,
                format!("expected {} tokens, found {}", num_columns, values.len()),
            ));
        }

        Ok(Self { offset, values })
    }

    /// Returns the record offset
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the column values in schema order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the value at a 0-based column ordinal
    pub fn value(&self, ordinal: usize) -> Option<&str> {
        self.values.get(ordinal).map(String::as_str)
    }

    /// Consumes the record, keeping only the value at `ordinal`
    pub fn into_value(mut self, ordinal: usize) -> Option<String> {
        if ordinal < self.values.len() {
            Some(self.values.swap_remove(ordinal))
        } else {
            None
        }
    }

    /// Number of column values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
