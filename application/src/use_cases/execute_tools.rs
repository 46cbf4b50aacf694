//! Execute Tools use case.
//!
//! Runs the model's tool calls through the full pipeline:
//!
//! ```text
//! resolve alias → look up handler → parse → validate → authorize → run handler
//!       │               │              │         │           │           │
//!       │          NOT_FOUND      ENVELOPE  VALIDATION  PERMISSION    FAULT (panic)
//!       ▼
//!   canonical name
//! ```
//!
//! Every stage that fails short-circuits into a failed [`ToolResult`]; no
//! handler runs for a call that did not pass validation and authorization.
//! Calls of one batch run concurrently and independently.

use crate::config::AgentConfig;
use crate::ports::tool_event_logger::{NoToolEventLogger, ToolEvent, ToolEventLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::tools::dispatch::{HandlerContext, HandlerTable, ToolKit};
use crate::tools::parser::parse_tool_call;
use crate::tools::permission::{PermissionDecision, PermissionGate};
use async_trait::async_trait;
use futures::future::join_all;
use scholar_domain::tool::{
    DefaultToolValidator, ToolCall, ToolError, ToolResult, ToolSpec, ToolValidator,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ExecuteToolsUseCase {
    spec: ToolSpec,
    handlers: HandlerTable,
    validator: DefaultToolValidator,
    gate: PermissionGate,
    logger: Arc<dyn ToolEventLogger>,
}

impl ExecuteToolsUseCase {
    pub fn new(kit: ToolKit) -> Self {
        let (spec, handlers) = kit.into_parts();
        Self::from_parts(spec, handlers)
    }

    pub fn from_parts(spec: ToolSpec, handlers: HandlerTable) -> Self {
        Self {
            spec,
            handlers,
            validator: DefaultToolValidator,
            gate: PermissionGate::new(),
            logger: Arc::new(NoToolEventLogger),
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn ToolEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    fn reject(&self, call: &ToolCall, tool: &str, error: ToolError) -> ToolResult {
        warn!("Tool call {} ({}) rejected: {}", call.id, tool, error);
        self.logger.log(ToolEvent::new(
            "tool_rejected",
            json!({
                "call_id": call.id,
                "tool": tool,
                "kind": error.code(),
                "error": error.message,
            }),
        ));
        ToolResult::failure(error)
    }

    async fn run(&self, call: &ToolCall, config: Arc<AgentConfig>) -> ToolResult {
        let tool = self.spec.resolve(&call.name).unwrap_or(call.name.as_str()).to_string();
        if tool != call.name {
            debug!("Resolved tool alias: {} -> {}", call.name, tool);
        }
        self.logger.log(ToolEvent::new(
            "tool_call",
            json!({
                "call_id": call.id,
                "tool": tool,
                "requested": call.name,
            }),
        ));

        let Some(handler) = self.handlers.get(&tool) else {
            return self.reject(
                call,
                &tool,
                ToolError::not_found(format!("Unknown tool '{}'", call.name)),
            );
        };

        let parsed = match parse_tool_call(call) {
            Ok(parsed) => parsed,
            Err(e) => return self.reject(call, &tool, e),
        };

        let args = match self.validator.validate(&tool, self.spec.get(&tool), parsed.arguments) {
            Ok(args) => args,
            Err(failure) => {
                return self.reject(call, &tool, ToolError::validation(failure.to_string()));
            }
        };
        if !args.is_checked() {
            warn!("Tool {} has no registered schema, passing arguments through", tool);
        }

        let level = self.spec.sensitivity(&tool);
        if let PermissionDecision::Denied(reason) =
            self.gate.authorize(&call.id, &tool, level, &config).await
        {
            self.logger.log(ToolEvent::new(
                "tool_denied",
                json!({ "call_id": call.id, "tool": tool, "sensitivity": level.as_str() }),
            ));
            return self.reject(call, &tool, ToolError::permission_denied(reason));
        }

        debug!("Executing tool {} ({})", tool, call.id);
        let ctx = HandlerContext::new(call.id.clone(), config);
        let task = tokio::spawn(async move { handler.handle(args, &ctx).await });
        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                let message = if e.is_panic() {
                    format!("Tool '{}' panicked during execution", tool)
                } else {
                    format!("Tool '{}' was cancelled during execution", tool)
                };
                warn!("{} ({})", message, call.id);
                ToolResult::failure(ToolError::fault(message))
            }
        };

        if let Some(error) = result.error() {
            debug!("Tool {} ({}) failed: {}", tool, call.id, error);
        }
        self.logger.log(ToolEvent::new(
            "tool_result",
            json!({
                "call_id": call.id,
                "tool": tool,
                "success": result.is_success(),
                "kind": result.error().map(|e| e.code()),
                "summary": result.summary(),
            }),
        ));
        result
    }
}

#[async_trait]
impl ToolExecutorPort for ExecuteToolsUseCase {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall, config: &AgentConfig) -> ToolResult {
        self.run(call, Arc::new(config.clone())).await
    }

    async fn execute_batch(
        &self,
        calls: &[ToolCall],
        config: &AgentConfig,
    ) -> HashMap<String, ToolResult> {
        let config = Arc::new(config.clone());
        debug!("Executing batch of {} tool calls", calls.len());

        let results = join_all(calls.iter().map(|call| self.run(call, config.clone()))).await;

        let mut by_id = HashMap::with_capacity(calls.len());
        for (call, result) in calls.iter().zip(results) {
            if by_id.insert(call.id.clone(), result).is_some() {
                warn!("Duplicate tool call id {}, keeping the later result", call.id);
            }
        }
        by_id
    }
}
