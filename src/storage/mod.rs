//! Record storage subsystem for mydb
//!
//! A table's data file is a run of fixed-size records; the only addressing is
//! offset arithmetic on the record size. Each record holds one
//! whitespace-separated token per column.
//!
//! # Design Principles
//!
//! - Read-only: the store never writes the data file
//! - Bounded reads: a record is parsed from its own slot only
//! - Scoped handles: each operation opens and releases the file

mod errors;
mod reader;
mod record;

pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use reader::{IndexBuild, RecordScan, RecordStore};
pub use record::Record;
