//! Query front-end for mydb
//!
//! Turns one query line into an immutable `QueryPlan`.
//!
//! # Design Principles
//!
//! - Deterministic: same line, schema and index set give the same plan
//! - Fixed precedence: validation checks run in order, first failure wins
//! - Total: no input makes validation read past the end of the tokens
//!
//! # Access Paths
//!
//! 1. Indexed predicate column: single-offset index lookup
//! 2. Any other column: linear scan in file order

mod ast;
mod errors;
mod planner;
mod validator;

pub use ast::{tokenize, Projection, SelectQuery, EXIT};
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use planner::{AccessPath, IndexCatalog, QueryPlan, QueryPlanner};
pub use validator::QueryValidator;
