//! Turn runner.
//!
//! Owns the [`AgentState`] between model turns. The executor is stateless,
//! so all counter updates happen here, after a batch has fully completed.
//! A destructive call that needed approval while no approval channel was
//! configured is parked in the pending-approval slot for the caller to
//! surface.

use crate::config::AgentConfig;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::tools::permission::PermissionGate;
use scholar_domain::tool::{PermissionPolicy, SensitivityLevel, ToolCall, ToolErrorKind, ToolResult};
use scholar_domain::{AgentState, PendingApproval};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("Iteration limit reached ({max} turns)")]
    IterationLimit { max: usize },
}

/// Outcome of one turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub iteration: usize,
    pub results: HashMap<String, ToolResult>,
    /// Tools that have now failed `max_tool_retries` times in a row
    pub exhausted_tools: Vec<String>,
    /// Last destructive call that wanted approval with no channel to ask
    pub pending_approval: Option<PendingApproval>,
}

pub struct TurnRunner<T: ToolExecutorPort> {
    executor: Arc<T>,
    state: AgentState,
}

impl<T: ToolExecutorPort> TurnRunner<T> {
    pub fn new(executor: Arc<T>) -> Self {
        Self {
            executor,
            state: AgentState::new(),
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Clear and return the call left waiting for approval, if any.
    pub fn take_pending_approval(&mut self) -> Option<PendingApproval> {
        self.state.take_pending_approval()
    }

    fn awaits_approval(&self, tool: &str, result: &ToolResult, config: &AgentConfig) -> bool {
        config.permission_handler.is_none()
            && result.error_kind() == Some(ToolErrorKind::Permission)
            && self.executor.tool_spec().sensitivity(tool) == SensitivityLevel::Destructive
            && PermissionGate::resolve_policy(&config.permissions, tool).policy
                == PermissionPolicy::Ask
    }

    pub async fn run_turn(
        &mut self,
        calls: &[ToolCall],
        config: &AgentConfig,
    ) -> Result<TurnReport, TurnError> {
        if self.state.exceeded(&config.limits) {
            warn!("Refusing turn: iteration limit {} reached", config.limits.max_iterations);
            return Err(TurnError::IterationLimit {
                max: config.limits.max_iterations,
            });
        }

        let iteration = self.state.begin_iteration();
        if let Some(stale) = self.state.take_pending_approval() {
            debug!("Dropping unanswered approval for {} ({})", stale.tool_name, stale.call_id);
        }
        let results = self.executor.execute_batch(calls, config).await;

        let mut exhausted_tools = Vec::new();
        for call in calls {
            let Some(result) = results.get(&call.id) else {
                continue;
            };
            let tool = self
                .executor
                .tool_spec()
                .resolve(&call.name)
                .unwrap_or(call.name.as_str())
                .to_string();
            self.state.record_result(&tool, result.is_success());
            if self.awaits_approval(&tool, result, config) {
                self.state.set_pending_approval(call.id.clone(), tool.clone());
            }
            if !result.is_success()
                && self.state.retries_exhausted(&tool, &config.limits)
                && !exhausted_tools.contains(&tool)
            {
                exhausted_tools.push(tool);
            }
        }

        info!(
            "Turn {}: {} calls, {} failed so far",
            iteration, self.state.total_calls, self.state.failed_calls
        );
        Ok(TurnReport {
            iteration,
            results,
            exhausted_tools,
            pending_approval: self.state.pending_approval.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::backends;
    use crate::tools::toolkit::{HandlerSettings, research_toolkit};
    use crate::use_cases::execute_tools::ExecuteToolsUseCase;
    use scholar_domain::AgentLimits;
    use serde_json::json;

    fn runner() -> TurnRunner<ExecuteToolsUseCase> {
        let kit = research_toolkit(&backends(), HandlerSettings::default());
        TurnRunner::new(Arc::new(ExecuteToolsUseCase::new(kit)))
    }

    fn config(max_iterations: usize) -> AgentConfig {
        AgentConfig::default().with_limits(AgentLimits {
            max_iterations,
            max_tool_retries: 2,
        })
    }

    #[tokio::test]
    async fn test_refuses_after_ceiling() {
        let mut runner = runner();
        let calls = [ToolCall::with_json("c1", "get_item", &json!({"item_id": "I1"}))];
        assert!(runner.run_turn(&calls, &config(1)).await.is_ok());
        assert_eq!(
            runner.run_turn(&calls, &config(1)).await.unwrap_err(),
            TurnError::IterationLimit { max: 1 }
        );
        assert_eq!(runner.state().iteration, 1);
    }

    #[tokio::test]
    async fn test_ask_without_channel_parks_pending_approval() {
        let mut runner = runner();
        let config = config(10).with_permissions(
            crate::config::PermissionRules::new().with_require_approval_for_destructive(true),
        );
        let calls = [
            ToolCall::with_json("c1", "get_item", &json!({"item_id": "I1"})),
            ToolCall::with_json("c2", "delete_item", &json!({"item_id": "I1"})),
        ];
        let report = runner.run_turn(&calls, &config).await.unwrap();
        let pending = report.pending_approval.unwrap();
        assert_eq!(pending.call_id, "c2");
        assert_eq!(pending.tool_name, "delete_item");

        assert_eq!(runner.take_pending_approval(), Some(pending));
        assert!(runner.take_pending_approval().is_none());
    }

    #[tokio::test]
    async fn test_explicit_deny_is_not_pending() {
        let mut runner = runner();
        let config = config(10).with_permissions(
            crate::config::PermissionRules::new().with_rule("delete_*", "deny"),
        );
        let calls = [ToolCall::with_json("c1", "delete_item", &json!({"item_id": "I1"}))];
        let report = runner.run_turn(&calls, &config).await.unwrap();
        assert!(!report.results["c1"].is_success());
        assert!(report.pending_approval.is_none());

        let ask = config.with_permissions(
            crate::config::PermissionRules::new().with_require_approval_for_destructive(true),
        );
        runner.run_turn(&calls, &ask).await.unwrap();
        assert!(runner.state().pending_approval.is_some());
        let calm = [ToolCall::with_json("c2", "get_item", &json!({"item_id": "I1"}))];
        let report = runner.run_turn(&calm, &ask).await.unwrap();
        assert!(report.pending_approval.is_none());
    }

    #[tokio::test]
    async fn test_retry_counts_use_canonical_name() {
        let mut runner = runner();
        let bad = [ToolCall::with_json("c1", "notes", &json!({"action": "read"}))];
        runner.run_turn(&bad, &config(10)).await.unwrap();
        let report = runner.run_turn(&bad, &config(10)).await.unwrap();

        assert_eq!(runner.state().retries_for("note"), 2);
        assert_eq!(report.exhausted_tools, vec!["note".to_string()]);

        let good = [ToolCall::with_json("c2", "note", &json!({"action": "read", "note_id": "N1"}))];
        runner.run_turn(&good, &config(10)).await.unwrap();
        assert_eq!(runner.state().retries_for("note"), 0);
        assert_eq!(runner.state().failed_calls, 2);
    }
}
