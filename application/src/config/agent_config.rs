//! Request-scoped agent configuration.
//!
//! [`AgentConfig`] is shared read-only by every call of a batch. Handlers
//! read the scope and size limits from it; the permission gate reads the
//! rules and the approval channel.

use super::permission_rules::PermissionRules;
use crate::ports::permission_handler::PermissionHandler;
use scholar_domain::AgentLimits;
use std::sync::Arc;

pub const DEFAULT_MAX_CONTENT_CHARS: usize = 50_000;

#[derive(Clone)]
pub struct AgentConfig {
    /// Library the session is bound to; `None` means every visible library
    pub scope: Option<String>,
    /// Ceilings for the turn loop; the executor does not enforce them
    pub limits: AgentLimits,
    /// Upper bound on text returned by page fetches and PDF reads
    pub max_content_chars: usize,
    pub permissions: PermissionRules,
    /// Approval channel for `ask` policies; absent means fail closed
    pub permission_handler: Option<Arc<dyn PermissionHandler>>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            scope: None,
            limits: AgentLimits::default(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            permissions: PermissionRules::default(),
            permission_handler: None,
        }
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("scope", &self.scope)
            .field("limits", &self.limits)
            .field("max_content_chars", &self.max_content_chars)
            .field("permissions", &self.permissions)
            .field("permission_handler", &self.permission_handler.is_some())
            .finish()
    }
}

impl AgentConfig {
    // ==================== Builder Methods ====================

    pub fn with_scope(mut self, library_id: impl Into<String>) -> Self {
        self.scope = Some(library_id.into());
        self
    }

    pub fn with_limits(mut self, limits: AgentLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_content_chars(mut self, max: usize) -> Self {
        self.max_content_chars = max;
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionRules) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_permission_handler(mut self, handler: Arc<dyn PermissionHandler>) -> Self {
        self.permission_handler = Some(handler);
        self
    }
}
