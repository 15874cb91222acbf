//! Index set for mydb
//!
//! Holds one `BalancedIndex` per indexed column, rebuilt from the data file
//! on startup and read-only afterwards.
//!
//! # API
//!
//! - `build(schema, source)` - Build every index the schema asks for
//! - `lookup(column, value)` - Exact match lookup on an indexed column
//! - `is_indexed(column)` - Whether predicates on `column` use an index

use std::slice;

use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::schema::TableSchema;
use crate::storage::{IndexBuild, RecordStore, StorageError, StorageResult};

use super::avl::{BalancedIndex, RecordOffset};

/// Trait for scanning storage during an index build
pub trait ColumnScan {
    /// Builds an index over the 0-based column `ordinal`
    fn build_column_index(&self, ordinal: usize) -> StorageResult<IndexBuild>;
}

impl ColumnScan for RecordStore {
    fn build_column_index(&self, ordinal: usize) -> StorageResult<IndexBuild> {
        self.build_index(ordinal)
    }
}

/// Outcome of building one column's index
#[derive(Debug)]
pub enum IndexStatus {
    /// Built from every record of the data file
    Ready,
    /// Built from every well-formed record; the malformed ones were skipped
    Partial(Vec<StorageError>),
    /// Left empty because the data file could not be read
    Degraded(StorageError),
}

/// The index of one column
#[derive(Debug)]
pub struct ColumnIndex {
    /// Column name
    column: String,
    /// Value -> record offset
    tree: BalancedIndex,
    /// Build outcome
    status: IndexStatus,
}

impl ColumnIndex {
    /// Returns the column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the underlying tree
    pub fn tree(&self) -> &BalancedIndex {
        &self.tree
    }

    /// Returns the build outcome
    pub fn status(&self) -> &IndexStatus {
        &self.status
    }

    /// Returns the build failure, if the index was degraded
    pub fn degradation(&self) -> Option<&StorageError> {
        match &self.status {
            IndexStatus::Degraded(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the records left out of the index
    pub fn skipped(&self) -> &[StorageError] {
        match &self.status {
            IndexStatus::Partial(skipped) => skipped,
            _ => &[],
        }
    }
}

/// All column indexes of one table
#[derive(Debug, Default)]
pub struct IndexSet {
    indexes: Vec<ColumnIndex>,
}

impl IndexSet {
    /// Creates an empty index set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index for every indexed column, in schema order.
    ///
    /// A column whose data file cannot be read keeps an empty index and
    /// records the failure in its status. Malformed records are left out of
    /// the index and logged one by one. The remaining columns are still built.
    pub fn build<S: ColumnScan>(schema: &TableSchema, source: &S) -> Self {
        let table = schema.table_name();
        let scope = ObservationScope::with_fields("INDEX_BUILD", &[("table", table)]);

        let mut indexes = Vec::new();
        for column in schema.indexed_columns() {
            let (tree, status) = match source.build_column_index(column.ordinal) {
                Ok(IndexBuild { index, skipped }) => {
                    debug_assert!(index.validate_structure().is_ok());
                    for err in &skipped {
                        let offset = err.offset().map(|o| o.to_string()).unwrap_or_default();
                        log_event_with_fields(
                            Event::IndexBuildDegraded,
                            &[
                                ("code", err.code().code()),
                                ("column", column.name.as_str()),
                                ("offset", offset.as_str()),
                                ("reason", err.message()),
                            ],
                        );
                    }
                    log_event_with_fields(
                        Event::IndexBuilt,
                        &[
                            ("column", column.name.as_str()),
                            ("height", &index.height().to_string()),
                            ("size", &index.size().to_string()),
                            ("skipped", &skipped.len().to_string()),
                        ],
                    );
                    let status = if skipped.is_empty() {
                        IndexStatus::Ready
                    } else {
                        IndexStatus::Partial(skipped)
                    };
                    (index, status)
                }
                Err(err) => {
                    log_event_with_fields(
                        Event::IndexBuildDegraded,
                        &[
                            ("code", err.code().code()),
                            ("column", column.name.as_str()),
                            ("reason", err.message()),
                        ],
                    );
                    (BalancedIndex::new(), IndexStatus::Degraded(err))
                }
            };

            indexes.push(ColumnIndex {
                column: column.name.clone(),
                tree,
                status,
            });
        }

        let set = Self { indexes };
        scope.complete_with_fields(&[
            ("degraded", &set.degraded().count().to_string()),
            ("indexes", &set.len().to_string()),
        ]);
        set
    }

    /// Returns the index of `column`, if it has one
    pub fn get(&self, column: &str) -> Option<&BalancedIndex> {
        self.indexes
            .iter()
            .find(|index| index.column == column)
            .map(|index| &index.tree)
    }

    /// Checks if predicates on `column` are answered by an index
    pub fn is_indexed(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Exact-match lookup; `None` if the column is not indexed or the
    /// value is absent.
    pub fn lookup(&self, column: &str, value: &str) -> Option<RecordOffset> {
        self.get(column)?.search(value).copied()
    }

    /// Column indexes in schema order
    pub fn iter(&self) -> slice::Iter<'_, ColumnIndex> {
        self.indexes.iter()
    }

    /// Column indexes left empty because the data file could not be read
    pub fn degraded(&self) -> impl Iterator<Item = &ColumnIndex> {
        self.indexes.iter().filter(|index| index.degradation().is_some())
    }

    /// Number of column indexes
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no column is indexed
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a ColumnIndex;
    type IntoIter = slice::Iter<'a, ColumnIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Serves fixed column values; fails for ordinals listed in `unavailable`
    /// and reports rows with too few values as malformed.
    struct MockSource {
        rows: Vec<Vec<&'static str>>,
        record_size: u64,
        unavailable: Vec<usize>,
    }

    impl MockSource {
        fn new(rows: Vec<Vec<&'static str>>) -> Self {
            Self {
                rows,
                record_size: 20,
                unavailable: Vec::new(),
            }
        }

        fn with_unavailable(mut self, ordinal: usize) -> Self {
            self.unavailable.push(ordinal);
            self
        }
    }

    impl ColumnScan for MockSource {
        fn build_column_index(&self, ordinal: usize) -> StorageResult<IndexBuild> {
            if self.unavailable.contains(&ordinal) {
                return Err(StorageError::data_file_unavailable(
                    "t.data",
                    io::Error::new(io::ErrorKind::NotFound, "missing"),
                ));
            }

            let mut build = IndexBuild::default();
            for (i, row) in self.rows.iter().enumerate() {
                let offset = i as u64 * self.record_size;
                match row.get(ordinal) {
                    Some(value) => {
                        build.index.insert(value.to_string(), offset);
                    }
                    None => build
                        .skipped
                        .push(StorageError::malformed_record(offset, "too few values")),
                }
            }
            Ok(build)
        }
    }

    fn schema() -> TableSchema {
        TableSchema::new("t", 20, [("id", true), ("name", false), ("city", true)])
    }

    fn rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["1", "alice", "paris"],
            vec!["2", "bob", "rome"],
            vec!["3", "carol", "paris"],
        ]
    }

    #[test]
    fn test_build_only_indexed_columns() {
        let set = IndexSet::build(&schema(), &MockSource::new(rows()));

        assert_eq!(set.len(), 2);
        assert!(set.is_indexed("id"));
        assert!(!set.is_indexed("name"));
        assert!(set.is_indexed("city"));

        let columns: Vec<&str> = set.iter().map(|i| i.column()).collect();
        assert_eq!(columns, vec!["id", "city"]);
    }

    #[test]
    fn test_lookup_single_offset() {
        let set = IndexSet::build(&schema(), &MockSource::new(rows()));

        assert_eq!(set.lookup("id", "2"), Some(20));
        assert_eq!(set.lookup("id", "9"), None);
        // Duplicate values keep the first record's offset
        assert_eq!(set.lookup("city", "paris"), Some(0));
        assert_eq!(set.get("city").unwrap().size(), 2);
    }

    #[test]
    fn test_lookup_on_unindexed_column() {
        let set = IndexSet::build(&schema(), &MockSource::new(rows()));
        assert_eq!(set.lookup("name", "bob"), None);
    }

    #[test]
    fn test_degraded_column_is_empty_but_present() {
        let source = MockSource::new(rows()).with_unavailable(0);
        let set = IndexSet::build(&schema(), &source);

        assert_eq!(set.len(), 2);
        assert!(set.is_indexed("id"));
        assert_eq!(set.lookup("id", "1"), None);

        let degraded: Vec<&str> = set.degraded().map(|i| i.column()).collect();
        assert_eq!(degraded, vec!["id"]);

        let id = set.iter().next().unwrap();
        assert_eq!(id.tree().height(), -1);
        assert!(id.degradation().unwrap().is_unavailable());

        // Other columns still built
        assert_eq!(set.lookup("city", "rome"), Some(20));
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_degrading() {
        let source = MockSource::new(vec![
            vec!["1", "alice", "paris"],
            vec!["2"],
            vec!["3", "carol", "rome"],
        ]);
        let set = IndexSet::build(&schema(), &source);

        assert_eq!(set.degraded().count(), 0);
        assert_eq!(set.lookup("id", "1"), Some(0));
        assert_eq!(set.lookup("id", "2"), Some(20));
        assert_eq!(set.lookup("city", "rome"), Some(40));

        let city = set.iter().nth(1).unwrap();
        assert!(matches!(city.status(), IndexStatus::Partial(_)));
        assert_eq!(city.skipped().len(), 1);
        assert_eq!(city.skipped()[0].offset(), Some(20));
        assert_eq!(city.tree().size(), 2);

        let id = set.iter().next().unwrap();
        assert!(matches!(id.status(), IndexStatus::Ready));
        assert!(id.skipped().is_empty());
    }

    #[test]
    fn test_no_indexed_columns() {
        let schema = TableSchema::new("t", 20, [("id", false)]);
        let set = IndexSet::build(&schema, &MockSource::new(rows()));
        assert!(set.is_empty());
    }
}
