//! Observability subsystem for mydb
//!
//! Provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Session counters
//!
//! Observability is read-only: nothing here changes query results, and a
//! failure to write a log line is never reported to the caller.
//!
//! ```ignore
//! use mydb::observability::{Logger, Event, log_event_with_fields};
//!
//! Logger::info("QUERY_COMPLETE", &[("rows", "2")]);
//! log_event_with_fields(Event::StartupBegin, &[("table", "students")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::ObservationScope;

fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}
