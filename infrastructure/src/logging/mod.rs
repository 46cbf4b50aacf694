//! Logging infrastructure: structured tool-call audit trail.
//!
//! Provides [`JsonlToolEventLogger`], a JSONL file writer that implements
//! the [`ToolEventLogger`](scholar_application::ToolEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlToolEventLogger;
