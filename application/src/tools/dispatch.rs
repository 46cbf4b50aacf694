//! Handler dispatch table.
//!
//! [`ToolKit`] is the composition root for tools: every handler is
//! registered together with its [`ToolDefinition`], so each dispatch name
//! has exactly one catalog entry and therefore exactly one sensitivity
//! level. [`ToolKit::into_parts`] yields the immutable [`ToolSpec`] and
//! [`HandlerTable`] the executor holds for the life of the process.

use crate::config::AgentConfig;
use async_trait::async_trait;
use scholar_domain::tool::{
    ParameterSchema, SensitivityLevel, ToolDefinition, ToolError, ToolResult, ToolSpec,
    ValidatedArguments,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a handler may read besides its arguments
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub call_id: String,
    pub config: Arc<AgentConfig>,
}

impl HandlerContext {
    pub fn new(call_id: impl Into<String>, config: Arc<AgentConfig>) -> Self {
        Self {
            call_id: call_id.into(),
            config,
        }
    }
}

/// A tool implementation.
///
/// Handlers report every failure through the returned [`ToolResult`]; they
/// never see arguments that have not been through the validator.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult;
}

/// Decode validated arguments into a handler's typed input.
///
/// Decode failures become a failed result naming the tool, so an
/// out-of-range action can never reach a `match` arm.
pub fn decode_args<T: serde::de::DeserializeOwned>(
    tool_name: &str,
    args: &ValidatedArguments,
) -> Result<T, ToolResult> {
    args.decode::<T>().map_err(|e| {
        let action = args
            .get(scholar_domain::ACTION_FIELD)
            .and_then(|v| v.as_str())
            .map(|a| format!(" (action '{}')", a))
            .unwrap_or_default();
        ToolResult::failure(ToolError::validation(format!(
            "Unsupported arguments for tool '{}'{}: {}",
            tool_name, action, e
        )))
    })
}

#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort();
        f.debug_struct("HandlerTable").field("handlers", &names).finish()
    }
}

/// Builder pairing tool definitions with handlers.
#[derive(Debug, Default)]
pub struct ToolKit {
    spec: ToolSpec,
    handlers: HandlerTable,
}

impl ToolKit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later registration under the same name replaces
    /// both the definition and the handler.
    pub fn register(mut self, definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        self.handlers.insert(definition.name.clone(), handler);
        self.spec = self.spec.register(definition);
        self
    }

    /// Register an extension tool without a parameter schema. Its arguments
    /// reach the handler as [`ValidatedArguments::Unchecked`].
    pub fn register_open(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        sensitivity: SensitivityLevel,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        let definition =
            ToolDefinition::new(name, description, sensitivity).with_schema(ParameterSchema::Open);
        self.register(definition, handler)
    }

    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.spec = self.spec.register_alias(alias, canonical);
        self
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn into_parts(self) -> (ToolSpec, HandlerTable) {
        (self.spec, self.handlers)
    }
}
