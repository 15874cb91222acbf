//! mydb - indexed fixed-record tables queried with a fixed-shape select
//!
//! Startup reads `<table>.meta`, then builds an AVL index over every column
//! flagged as indexed by scanning `<table>.data`. Each query
//!
//! ```text
//! select <COL|*> from <TABLE> where <COL> = <VALUE>
//! ```
//!
//! is validated against the schema, answered by an index lookup or a linear
//! scan, and projected in schema order.

pub mod cli;
pub mod executor;
pub mod index;
pub mod observability;
pub mod planner;
pub mod schema;
pub mod storage;
