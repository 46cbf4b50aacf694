//! Tool domain module
//!
//! This module defines the contract between a probabilistic text generator
//! and the side-effecting operations of the research assistant: what the
//! model may call, what arguments each call accepts, and how dangerous each
//! call is.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌────────────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ValidatedArguments │───▶│ ToolResult   │
//! │ (catalog)    │    │ (raw text)   │    │ (checked/unchecked)│    │ (envelope)   │
//! └──────┬───────┘    └──────────────┘    └────────────────────┘    └──────────────┘
//!        │
//!        ├─ schema:      ParameterSchema per tool (Object / Actions / Open)
//!        ├─ sensitivity: read / write / destructive
//!        └─ aliases:     "notes" → "note"
//! ```
//!
//! # Unified tools
//!
//! Consolidated tools such as `collection` and `note` take an `action`
//! discriminator. Their schema is a [`ParameterSchema::Actions`] union: the
//! validator branches on `action` first, then applies the variant's own
//! object schema.
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application**: permission gate, dispatch table, handlers, executor
//! - **Infrastructure**: JSON Schema rendering, backend adapters

pub mod arguments;
pub mod entities;
pub mod schema;
pub mod sensitivity;
pub mod traits;
pub mod value_objects;

pub use arguments::ValidatedArguments;
pub use entities::{ToolCall, ToolDefinition, ToolSpec};
pub use schema::{
    ACTION_FIELD, ActionVariant, ObjectSchema, ParamKind, ParameterSchema, Refinement,
    ToolParameter, Violation,
};
pub use sensitivity::{PermissionPolicy, SensitivityLevel};
pub use traits::{DefaultToolValidator, ToolValidator, ValidationFailure};
pub use value_objects::{ToolError, ToolErrorKind, ToolResult};
