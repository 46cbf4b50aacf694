//! Tool Executor port
//!
//! Defines the interface the conversation loop uses to run tool calls.

use crate::config::AgentConfig;
use async_trait::async_trait;
use scholar_domain::tool::{ToolCall, ToolDefinition, ToolResult, ToolSpec};
use std::collections::HashMap;

/// Port for tool execution
///
/// Implementations never fail: every call resolves to exactly one
/// [`ToolResult`], whatever stage it stops at.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool (or alias) is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get_resolved(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute one tool call
    async fn execute(&self, call: &ToolCall, config: &AgentConfig) -> ToolResult;

    /// Execute every call of one turn concurrently.
    ///
    /// The map holds one entry per distinct call id. When ids repeat, the
    /// result of the later call in `calls` wins.
    async fn execute_batch(
        &self,
        calls: &[ToolCall],
        config: &AgentConfig,
    ) -> HashMap<String, ToolResult>;
}
