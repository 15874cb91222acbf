//! Query execution for mydb
//!
//! Consumes plans and produces projected rows.
//!
//! # Execution Flow (strict order)
//!
//! 1. Match set from the chosen access path
//! 2. Fetch each matching record by offset
//! 3. Project selected columns in schema order
//!
//! # Invariants
//!
//! - Index lookups yield at most one record
//! - Linear scans yield every match in file order
//! - A storage failure ends the query, never the session

mod context;
mod errors;
mod evaluator;
mod executor;
mod result;

pub use context::{QueryContext, QueryOptions};
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use evaluator::{Evaluation, EvaluatorState, QueryEvaluator, NOT_FOUND};
pub use executor::{IndexLookup, QueryExecutor, RecordSource};
pub use result::{ExecutionResult, ResultField, ResultRow};
