//! Observable events
//!
//! Every log line carries one of these as its `event` key.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Server is listening
    BootComplete,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped accepting connections
    ShutdownComplete,
    /// Configuration loaded
    ConfigLoaded,

    // Store lifecycle
    /// Data directory created
    DataDirCreated,
    /// Backing file created empty
    StoreCreated,
    /// Backing file created from the sample dataset
    StoreSeeded,
    /// Store ready for use
    StoreOpened,

    // Store operations
    /// A record was created
    ProductCreated,
    /// A record was updated
    ProductUpdated,
    /// A record was deleted
    ProductDeleted,
    /// Reading or parsing the backing file failed
    StoreReadFailed,
    /// Writing the backing file failed
    StoreWriteFailed,

    // HTTP
    /// A request was rejected before reaching the store
    RequestRejected,
    /// A request failed inside the store
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataDirCreated => "DATA_DIR_CREATED",
            Event::StoreCreated => "STORE_CREATED",
            Event::StoreSeeded => "STORE_SEEDED",
            Event::StoreOpened => "STORE_OPENED",
            Event::ProductCreated => "PRODUCT_CREATED",
            Event::ProductUpdated => "PRODUCT_UPDATED",
            Event::ProductDeleted => "PRODUCT_DELETED",
            Event::StoreReadFailed => "STORE_READ_FAILED",
            Event::StoreWriteFailed => "STORE_WRITE_FAILED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreReadFailed | Event::StoreWriteFailed | Event::RequestFailed => {
                Severity::Error
            }
            Event::RequestRejected => Severity::Warn,
            Event::ProductCreated | Event::ProductUpdated | Event::ProductDeleted => {
                Severity::Trace
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_strings_are_screaming_snake_case() {
        let events = [
            Event::BootStart,
            Event::StoreSeeded,
            Event::ProductDeleted,
            Event::StoreWriteFailed,
            Event::RequestRejected,
        ];
        for event in events {
            let s = event.as_str();
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", s);
        }
    }

    #[test]
    fn test_failures_log_as_errors() {
        assert_eq!(Event::StoreReadFailed.severity(), Severity::Error);
        assert_eq!(Event::StoreWriteFailed.severity(), Severity::Error);
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
        assert_eq!(Event::StoreOpened.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::BootComplete), "BOOT_COMPLETE");
    }
}
