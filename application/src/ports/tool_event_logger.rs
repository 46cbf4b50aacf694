//! Port for structured tool-call audit logging.
//!
//! Defines the [`ToolEventLogger`] trait for recording each stage a tool
//! call passes through (received, rejected, denied, completed) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable audit trail (JSONL).

use serde_json::Value;

/// A structured tool event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolEvent {
    /// Event type identifier (e.g., "tool_call", "tool_denied", "tool_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ToolEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging tool events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible so that logging never
/// disrupts a tool call; write failures are ignored.
pub trait ToolEventLogger: Send + Sync {
    fn log(&self, event: ToolEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoToolEventLogger;

impl ToolEventLogger for NoToolEventLogger {
    fn log(&self, _event: ToolEvent) {}
}
