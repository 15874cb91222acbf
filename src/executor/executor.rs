//! Query executor for mydb
//!
//! Execution flow (strict order):
//! 1. Produce the match set from the plan's access path
//! 2. Fetch each matching record, in match order
//! 3. Project the selected columns, in schema order

use crate::index::{IndexSet, RecordOffset};
use crate::planner::{AccessPath, QueryPlan};
use crate::schema::TableSchema;
use crate::storage::{Record, RecordStore, StorageResult};

use super::errors::{ExecutorError, ExecutorResult};
use super::result::{ExecutionResult, ResultField, ResultRow};

/// Trait for looking up record offsets by index
pub trait IndexLookup {
    /// Offset of the first record whose `column` equals `value`
    fn lookup(&self, column: &str, value: &str) -> Option<RecordOffset>;
}

impl IndexLookup for IndexSet {
    fn lookup(&self, column: &str, value: &str) -> Option<RecordOffset> {
        IndexSet::lookup(self, column, value)
    }
}

/// Trait for reading records from storage
pub trait RecordSource {
    /// Read the record at `offset`
    fn get_record(&self, offset: RecordOffset) -> StorageResult<Record>;

    /// Offsets of every record whose 1-based `column_number` equals `target`
    fn linear_scan(&self, target: &str, column_number: usize) -> StorageResult<Vec<RecordOffset>>;
}

impl RecordSource for RecordStore {
    fn get_record(&self, offset: RecordOffset) -> StorageResult<Record> {
        RecordStore::get_record(self, offset)
    }

    fn linear_scan(&self, target: &str, column_number: usize) -> StorageResult<Vec<RecordOffset>> {
        RecordStore::linear_scan(self, target, column_number)
    }
}

/// Query executor that processes plans against storage
pub struct QueryExecutor<'a, I: IndexLookup, S: RecordSource> {
    schema: &'a TableSchema,
    index: &'a I,
    storage: &'a S,
}

impl<'a, I: IndexLookup, S: RecordSource> QueryExecutor<'a, I, S> {
    /// Creates a new executor
    pub fn new(schema: &'a TableSchema, index: &'a I, storage: &'a S) -> Self {
        Self {
            schema,
            index,
            storage,
        }
    }

    /// Executes a query plan and returns results.
    ///
    /// Same plan and same data file always yield the same rows.
    pub fn execute(&self, plan: &QueryPlan) -> ExecutorResult<ExecutionResult> {
        let offsets = self.match_set(plan)?;

        let mut result = ExecutionResult::empty(plan.access.clone());
        for offset in offsets {
            let record = self.storage.get_record(offset)?;
            result.rows.push(self.project(plan, &record)?);
        }

        Ok(result)
    }

    /// Index lookup yields at most one offset; a scan yields all matches in
    /// file order.
    fn match_set(&self, plan: &QueryPlan) -> ExecutorResult<Vec<RecordOffset>> {
        let value = plan.query.value.as_str();
        match &plan.access {
            AccessPath::IndexLookup { column } => {
                Ok(self.index.lookup(column, value).into_iter().collect())
            }
            AccessPath::LinearScan { column_number } => {
                Ok(self.storage.linear_scan(value, *column_number)?)
            }
        }
    }

    fn project(&self, plan: &QueryPlan, record: &Record) -> ExecutorResult<ResultRow> {
        let mut fields = Vec::new();
        for column in self.schema.columns() {
            if !plan.query.projection.includes(&column.name) {
                continue;
            }
            let value = record.value(column.ordinal).ok_or_else(|| {
                ExecutorError::execution_failed(format!(
                    "record at offset {} has no value for column '{}'",
                    record.offset(),
                    column.name
                ))
            })?;
            fields.push(ResultField::new(column.name.as_str(), value));
        }

        Ok(ResultRow {
            offset: record.offset(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Projection, SelectQuery};
    use crate::storage::StorageError;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// In-memory records at offsets 0, 20, 40, ...
    struct MockStorage {
        records: Vec<Vec<&'static str>>,
        reads: Cell<usize>,
    }

    impl MockStorage {
        fn new(records: Vec<Vec<&'static str>>) -> Self {
            Self {
                records,
                reads: Cell::new(0),
            }
        }
    }

    impl RecordSource for MockStorage {
        fn get_record(&self, offset: RecordOffset) -> StorageResult<Record> {
            self.reads.set(self.reads.get() + 1);
            let values = self
                .records
                .get((offset / 20) as usize)
                .ok_or_else(|| StorageError::invalid_offset(offset, "past end of file"))?;
            if values.is_empty() {
                return Err(StorageError::malformed_record(offset, "no tokens"));
            }
            Ok(Record::new(offset, values.iter().map(|v| v.to_string()).collect()))
        }

        fn linear_scan(
            &self,
            target: &str,
            column_number: usize,
        ) -> StorageResult<Vec<RecordOffset>> {
            Ok(self
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.get(column_number - 1) == Some(&target))
                .map(|(i, _)| i as u64 * 20)
                .collect())
        }
    }

    struct MockIndex {
        entries: HashMap<(&'static str, &'static str), RecordOffset>,
    }

    impl IndexLookup for MockIndex {
        fn lookup(&self, column: &str, value: &str) -> Option<RecordOffset> {
            self.entries
                .iter()
                .find(|((c, v), _)| *c == column && *v == value)
                .map(|(_, offset)| *offset)
        }
    }

    fn schema() -> TableSchema {
        TableSchema::new("t", 20, [("id", true), ("name", false)])
    }

    fn storage() -> MockStorage {
        MockStorage::new(vec![
            vec!["1", "alice"],
            vec!["2", "bob"],
            vec!["3", "alice"],
        ])
    }

    fn index() -> MockIndex {
        MockIndex {
            entries: [(("id", "1"), 0), (("id", "2"), 20), (("id", "3"), 40)]
                .into_iter()
                .collect(),
        }
    }

    fn plan(projection: Projection, column: &str, value: &str, access: AccessPath) -> QueryPlan {
        QueryPlan {
            query: SelectQuery::new(projection, "t", column, value),
            access,
        }
    }

    fn lookup_id() -> AccessPath {
        AccessPath::IndexLookup {
            column: "id".into(),
        }
    }

    #[test]
    fn test_index_lookup_projects_all_columns() {
        let (schema, index, storage) = (schema(), index(), storage());
        let executor = QueryExecutor::new(&schema, &index, &storage);

        let result = executor
            .execute(&plan(Projection::All, "id", "2", lookup_id()))
            .unwrap();

        let lines: Vec<String> = result.lines().collect();
        assert_eq!(lines, vec!["id: 2", "name: bob"]);
        assert_eq!(result.access.as_str(), "INDEX_LOOKUP");
    }

    #[test]
    fn test_linear_scan_returns_all_matches_in_file_order() {
        let (schema, index, storage) = (schema(), index(), storage());
        let executor = QueryExecutor::new(&schema, &index, &storage);

        let result = executor
            .execute(&plan(
                Projection::Column("id".into()),
                "name",
                "alice",
                AccessPath::LinearScan { column_number: 2 },
            ))
            .unwrap();

        let lines: Vec<String> = result.lines().collect();
        assert_eq!(lines, vec!["id: 1", "id: 3"]);
        assert_eq!(result.offsets().collect::<Vec<_>>(), vec![0, 40]);
    }

    #[test]
    fn test_index_miss_reads_nothing() {
        let (schema, index, storage) = (schema(), index(), storage());
        let executor = QueryExecutor::new(&schema, &index, &storage);

        let result = executor
            .execute(&plan(Projection::All, "id", "9", lookup_id()))
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(storage.reads.get(), 0);
    }

    #[test]
    fn test_storage_failure_propagates() {
        let schema = schema();
        let index = MockIndex {
            entries: [(("id", "7"), 60)].into_iter().collect(),
        };
        let storage = storage();
        let executor = QueryExecutor::new(&schema, &index, &storage);

        let err = executor
            .execute(&plan(Projection::All, "id", "7", lookup_id()))
            .unwrap_err();
        assert_eq!(err.offset(), Some(60));
        assert!(err.diagnostic().starts_with("**Error: invalid record offset 60"));
    }

    #[test]
    fn test_short_record_fails_projection() {
        let schema = schema();
        let index = index();
        let storage = MockStorage::new(vec![vec!["1"]]);
        let executor = QueryExecutor::new(&schema, &index, &storage);

        let err = executor
            .execute(&plan(Projection::All, "id", "1", lookup_id()))
            .unwrap_err();
        assert!(err.message().contains("column 'name'"));
    }
}
