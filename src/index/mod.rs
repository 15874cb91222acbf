//! Index subsystem for mydb
//!
//! Indexes are derived, in-memory-only state rebuilt from the data file on
//! every startup.
//!
//! # Design Principles
//!
//! - Derived state: indexes mirror the data file, never the source of truth
//! - In-memory only: no persistence
//! - Read-only after startup: no insert or delete while serving queries
//!
//! # Invariants
//!
//! - Every node's balance factor is in {-1, 0, 1}
//! - In-order traversal is strictly ascending by key
//! - A lookup yields at most one offset: the first record holding the value

mod avl;
mod manager;

pub use avl::{AvlTree, BalancedIndex, Iter, RecordOffset, EMPTY_HEIGHT};
pub use manager::{ColumnIndex, ColumnScan, IndexSet, IndexStatus};
