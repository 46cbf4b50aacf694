//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod backend;
pub mod conversation_context;
pub mod knowledge_base;
pub mod ocr;
pub mod permission_handler;
pub mod scholar;
pub mod tool_event_logger;
pub mod tool_executor;
pub mod tool_schema;
pub mod web;
