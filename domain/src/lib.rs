//! Domain layer for scholar-agent
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool bridge
//!
//! A language model emits tool calls as a name plus a JSON argument string.
//! The domain describes everything needed to judge such a call without
//! performing it:
//!
//! - **Catalog** ([`ToolSpec`]): the tools the model may call, with aliases
//! - **Schema** ([`ParameterSchema`]): the argument shape of each tool
//! - **Sensitivity** ([`SensitivityLevel`]): read / write / destructive
//! - **Result** ([`ToolResult`]): the envelope every call resolves to
//!
//! ## Research
//!
//! Library items, collections, notes and papers that handlers exchange
//! with backend ports.

pub mod agent;
pub mod config;
pub mod core;
pub mod research;
pub mod tool;

// Re-export commonly used types
pub use agent::{AgentLimits, AgentState, PendingApproval};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use research::{
    CitationDirection, Collection, ItemType, LibraryItem, Membership, Note, NoteDraft,
    NoteEditMode, OcrStatus, PageRange, Paper, WebHit, WebPage,
};
pub use tool::{
    ACTION_FIELD, ActionVariant, DefaultToolValidator, ObjectSchema, ParamKind, ParameterSchema,
    PermissionPolicy, Refinement, SensitivityLevel, ToolCall, ToolDefinition, ToolError,
    ToolErrorKind, ToolParameter, ToolResult, ToolSpec, ToolValidator, ValidatedArguments,
    ValidationFailure, Violation,
};
