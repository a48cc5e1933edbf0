//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and store events
//! - Atomic operation counters
//!
//! Observability is read-only: a failed log write never fails the
//! operation that produced it.
//!
//! # Usage
//!
//! ```ignore
//! use productdb::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ProductCreated, &[("id", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
