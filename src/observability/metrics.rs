//! Metrics registry for mydb
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics registry containing all session counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Queries that passed validation and ran to completion
    queries_executed: AtomicU64,
    /// Queries rejected by validation
    queries_rejected: AtomicU64,
    /// Queries that failed while reading records
    queries_failed: AtomicU64,
    /// Predicate lookups answered by an index
    index_lookups: AtomicU64,
    /// Predicate lookups answered by a full scan
    linear_scans: AtomicU64,
    /// Records fetched for projection
    records_fetched: AtomicU64,
    /// Executed queries with an empty match set
    not_found: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries failed
    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment index lookups
    pub fn increment_index_lookups(&self) {
        self.index_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment linear scans
    pub fn increment_linear_scans(&self) {
        self.linear_scans.fetch_add(1, Ordering::Relaxed);
    }

    /// Add to records fetched
    pub fn add_records_fetched(&self, count: u64) {
        self.records_fetched.fetch_add(count, Ordering::Relaxed);
    }

    /// Increment not-found results
    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current values as a JSON object
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"queries_executed":{},"queries_rejected":{},"queries_failed":{},"index_lookups":{},"linear_scans":{},"records_fetched":{},"not_found":{}}}"#,
            s.queries_executed,
            s.queries_rejected,
            s.queries_failed,
            s.index_lookups,
            s.linear_scans,
            s.records_fetched,
            s.not_found,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            index_lookups: self.index_lookups.load(Ordering::Relaxed),
            linear_scans: self.linear_scans.load(Ordering::Relaxed),
            records_fetched: self.records_fetched.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub queries_failed: u64,
    pub index_lookups: u64,
    pub linear_scans: u64,
    pub records_fetched: u64,
    pub not_found: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.queries_executed, 0);
        assert_eq!(snapshot.index_lookups, 0);
        assert_eq!(snapshot.records_fetched, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_queries_executed();
        registry.increment_queries_executed();
        registry.increment_queries_rejected();
        registry.increment_queries_failed();
        registry.increment_index_lookups();
        registry.increment_linear_scans();
        registry.add_records_fetched(3);
        registry.increment_not_found();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_executed, 2);
        assert_eq!(snapshot.queries_rejected, 1);
        assert_eq!(snapshot.queries_failed, 1);
        assert_eq!(snapshot.index_lookups, 1);
        assert_eq!(snapshot.linear_scans, 1);
        assert_eq!(snapshot.records_fetched, 3);
        assert_eq!(snapshot.not_found, 1);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.add_records_fetched(12);
        registry.increment_linear_scans();

        let parsed: serde_json::Value = serde_json::from_str(&registry.to_json()).unwrap();
        assert_eq!(parsed["records_fetched"], 12);
        assert_eq!(parsed["linear_scans"], 1);
        assert_eq!(parsed["index_lookups"], 0);
    }
}
