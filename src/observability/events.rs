//! Observability events for mydb
//!
//! Events are explicit and typed; each maps to one stable name.

use std::fmt;

/// Observable events in mydb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    StartupBegin,
    /// All indexes built, ready to serve queries
    StartupComplete,
    /// Startup aborted (FATAL)
    StartupFailed,
    /// Session ended
    ShutdownComplete,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Index build
    /// Index for one column built
    IndexBuilt,
    /// Index for one column left empty after a storage failure
    IndexBuildDegraded,

    // Query processing
    /// Query line received
    QueryReceived,
    /// Access path chosen
    QueryPlanned,
    /// Query executed
    QueryExecuted,
    /// Query failed validation
    QueryRejected,
    /// Query failed during execution
    QueryFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StartupBegin => "MYDB_STARTUP_BEGIN",
            Event::StartupComplete => "MYDB_STARTUP_COMPLETE",
            Event::StartupFailed => "MYDB_STARTUP_FAILED",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::IndexBuilt => "INDEX_BUILT",
            Event::IndexBuildDegraded => "INDEX_BUILD_DEGRADED",

            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StartupFailed)
    }

    /// Returns true if this event reports a recoverable problem
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::IndexBuildDegraded | Event::QueryRejected | Event::QueryFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
