//! Access path selection
//!
//! A predicate on an indexed column is answered by an index lookup; any
//! other column is answered by a linear scan of the data file.

use std::fmt;

use crate::index::IndexSet;
use crate::schema::TableSchema;

use super::ast::SelectQuery;
use super::errors::{PlannerError, PlannerResult};
use super::validator::QueryValidator;

/// Read-only view of which columns carry an index
pub trait IndexCatalog {
    /// Checks if `column` has an index
    fn is_indexed(&self, column: &str) -> bool;
}

impl IndexCatalog for IndexSet {
    fn is_indexed(&self, column: &str) -> bool {
        IndexSet::is_indexed(self, column)
    }
}

/// How the predicate's match set is produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPath {
    /// Single-offset search in the column's index
    IndexLookup { column: String },
    /// Full scan comparing the token at the 1-based column number
    LinearScan { column_number: usize },
}

impl AccessPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPath::IndexLookup { .. } => "INDEX_LOOKUP",
            AccessPath::LinearScan { .. } => "LINEAR_SCAN",
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Validated query
    pub query: SelectQuery,
    /// Chosen access path
    pub access: AccessPath,
}

/// Query planner that produces deterministic plans
pub struct QueryPlanner<'a, C: IndexCatalog> {
    schema: &'a TableSchema,
    catalog: &'a C,
    strict_grammar: bool,
}

impl<'a, C: IndexCatalog> QueryPlanner<'a, C> {
    /// Creates a new planner
    pub fn new(schema: &'a TableSchema, catalog: &'a C) -> Self {
        Self {
            schema,
            catalog,
            strict_grammar: false,
        }
    }

    /// Enables strict grammar checks during validation
    pub fn with_strict_grammar(mut self, strict: bool) -> Self {
        self.strict_grammar = strict;
        self
    }

    /// Validates and plans a tokenized query line.
    pub fn plan_tokens(&self, tokens: &[&str]) -> PlannerResult<QueryPlan> {
        let query = QueryValidator::new(self.schema)
            .with_strict_grammar(self.strict_grammar)
            .validate(tokens)?;
        self.plan(query)
    }

    /// Plans a validated query.
    ///
    /// Same query and index set always yield the same plan.
    pub fn plan(&self, query: SelectQuery) -> PlannerResult<QueryPlan> {
        let access = if self.catalog.is_indexed(&query.column) {
            AccessPath::IndexLookup {
                column: query.column.clone(),
            }
        } else {
            let column = self
                .schema
                .column(&query.column)
                .ok_or_else(|| PlannerError::invalid_where_column(Some(&query.column)))?;
            AccessPath::LinearScan {
                column_number: column.column_number(),
            }
        };

        Ok(QueryPlan { query, access })
    }
}
