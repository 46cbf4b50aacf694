//! Tool schema conversion port.
//!
//! Separates "which tools to offer" (domain) from "how to serialize for the
//! model API" (infrastructure). The domain layer defines [`ToolDefinition`]
//! and [`ToolSpec`]; this port renders them as JSON Schema. The rendered
//! schema must describe exactly what the validator enforces.

use scholar_domain::tool::{SensitivityLevel, ToolDefinition, ToolSpec};

/// Port for converting tool definitions to LLM API format (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Convert non-deprecated tools only (sorted by name). This is the
    /// surface advertised to the model.
    fn current_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Convert tools at exactly one sensitivity level (sorted by name).
    fn tools_at_schema(&self, spec: &ToolSpec, level: SensitivityLevel) -> Vec<serde_json::Value>;
}
