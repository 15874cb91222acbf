//! Everything a query needs, bundled once at startup

use std::path::Path;

use crate::index::IndexSet;
use crate::observability::MetricsRegistry;
use crate::schema::TableSchema;
use crate::storage::{RecordStore, StorageResult};

/// Per-session query options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Require `where` and `=` at their positions
    pub strict_grammar: bool,
}

/// Read-only state shared by every query of a session
#[derive(Debug)]
pub struct QueryContext {
    schema: TableSchema,
    store: RecordStore,
    indexes: IndexSet,
    options: QueryOptions,
    metrics: MetricsRegistry,
}

impl QueryContext {
    /// Bundles already-built parts into a context
    pub fn new(
        schema: TableSchema,
        store: RecordStore,
        indexes: IndexSet,
        options: QueryOptions,
    ) -> Self {
        Self {
            schema,
            store,
            indexes,
            options,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Opens the table's data file under `data_dir` and builds every index
    /// the schema declares.
    ///
    /// Fails only if the schema's layout cannot address records; a missing
    /// or unreadable data file leaves the affected indexes degraded.
    pub fn open(
        data_dir: &Path,
        schema: TableSchema,
        options: QueryOptions,
    ) -> StorageResult<Self> {
        let store = RecordStore::for_table(data_dir, &schema)?;
        let indexes = IndexSet::build(&schema, &store);
        Ok(Self::new(schema, store, indexes, options))
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn indexes(&self) -> &IndexSet {
        &self.indexes
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}
