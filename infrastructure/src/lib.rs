//! Infrastructure layer for scholar-agent
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the in-memory knowledge base and OCR simulator, the
//! web and academic-index clients, JSONL tool-event logging, JSON Schema
//! rendering and configuration file loading.

pub mod config;
pub mod context;
pub mod knowledge_base;
pub mod logging;
pub mod scholar;
pub mod tools;
#[cfg(feature = "web-tools")]
pub mod web;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig,
    FilePermissionsConfig, FileToolsConfig,
};
pub use context::InMemoryConversationContext;
pub use knowledge_base::{InMemoryKnowledgeBase, LibrarySnapshot, SimulatedOcr, SnapshotError};
pub use logging::JsonlToolEventLogger;
pub use scholar::OfflineScholar;
#[cfg(feature = "web-tools")]
pub use scholar::SemanticScholarClient;
pub use tools::JsonSchemaToolConverter;
#[cfg(feature = "web-tools")]
pub use web::DuckDuckGoWeb;
