//! Per-session agent state
//!
//! Counters and the pending-approval slot are owned by the turn loop, not
//! by the tool executor. The executor stays stateless so that concurrent
//! calls in one batch never race on these fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ceilings enforced by the turn loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLimits {
    /// Maximum number of model turns that may execute tools
    pub max_iterations: usize,
    /// Consecutive failures tolerated per tool before the loop gives up on it
    pub max_tool_retries: usize,
}

impl Default for AgentLimits {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            max_tool_retries: 3,
        }
    }
}

/// A destructive call waiting on the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub call_id: String,
    pub tool_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Number of turns started so far
    pub iteration: usize,
    pub total_calls: usize,
    pub failed_calls: usize,
    /// Consecutive failure count keyed by canonical tool name
    pub retry_counts: HashMap<String, usize>,
    pub pending_approval: Option<PendingApproval>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new turn, returning its 1-based number.
    pub fn begin_iteration(&mut self) -> usize {
        self.iteration += 1;
        self.iteration
    }

    /// Record one call outcome. Failures bump the tool's retry counter,
    /// successes clear it.
    pub fn record_result(&mut self, tool_name: &str, success: bool) {
        self.total_calls += 1;
        if success {
            self.retry_counts.remove(tool_name);
        } else {
            self.failed_calls += 1;
            *self.retry_counts.entry(tool_name.to_string()).or_insert(0) += 1;
        }
    }

    pub fn retries_for(&self, tool_name: &str) -> usize {
        self.retry_counts.get(tool_name).copied().unwrap_or(0)
    }

    pub fn retries_exhausted(&self, tool_name: &str, limits: &AgentLimits) -> bool {
        self.retries_for(tool_name) >= limits.max_tool_retries
    }

    /// Whether the iteration ceiling has been reached.
    pub fn exceeded(&self, limits: &AgentLimits) -> bool {
        self.iteration >= limits.max_iterations
    }

    pub fn set_pending_approval(&mut self, call_id: impl Into<String>, tool_name: impl Into<String>) {
        self.pending_approval = Some(PendingApproval {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
        });
    }

    pub fn take_pending_approval(&mut self) -> Option<PendingApproval> {
        self.pending_approval.take()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
