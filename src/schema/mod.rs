//! Schema catalog subsystem for mydb
//!
//! Each table is described by a `<table>.meta` file read once at startup.
//! The resulting `TableSchema` is immutable for the rest of the process.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{ColumnSchema, TableSchema};
