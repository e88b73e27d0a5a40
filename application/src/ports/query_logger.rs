//! Port for structured query logging.
//!
//! Defines the [`QueryLogger`] trait for recording pipeline events (query
//! received, tool chosen, tool outcome, final summary) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the query
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured query event for logging.
pub struct QueryEvent {
    /// Event type identifier (e.g., "query_received", "tool_call", "summary").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl QueryEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging query events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures never disrupt a
/// query.
pub trait QueryLogger: Send + Sync {
    /// Record a query event.
    fn log(&self, event: QueryEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoQueryLogger;

impl QueryLogger for NoQueryLogger {
    fn log(&self, _event: QueryEvent) {}
}
