//! Destructive-tool permission rules.
//!
//! Rules are kept as the raw strings the user wrote. Interpretation (and the
//! "unrecognised means deny" rule) happens in
//! [`PermissionGate`](crate::tools::permission::PermissionGate) so that a
//! typo in a config file can never widen access.

use serde::{Deserialize, Serialize};

/// One `pattern = policy` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    /// Exact tool name, or a glob pattern such as `delete_*` or `*`
    pub pattern: String,
    /// `allow`, `ask` or `deny`
    pub policy: String,
}

impl PermissionRule {
    pub fn is_wildcard(&self) -> bool {
        self.pattern.contains(['*', '?', '['])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRules {
    /// Fallback for destructive tools becomes `ask` instead of `allow`.
    /// Has no effect on read or write tools.
    pub require_approval_for_destructive: bool,
    /// Rules in declaration order
    pub rules: Vec<PermissionRule>,
}

impl PermissionRules {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Builder Methods ====================

    pub fn with_require_approval_for_destructive(mut self, require: bool) -> Self {
        self.require_approval_for_destructive = require;
        self
    }

    pub fn with_rule(mut self, pattern: impl Into<String>, policy: impl Into<String>) -> Self {
        self.rules.push(PermissionRule {
            pattern: pattern.into(),
            policy: policy.into(),
        });
        self
    }

    // ==================== Lookup ====================

    /// The rule naming `tool_name` exactly, if any.
    pub fn exact(&self, tool_name: &str) -> Option<&PermissionRule> {
        self.rules
            .iter()
            .find(|rule| !rule.is_wildcard() && rule.pattern == tool_name)
    }

    pub fn wildcards(&self) -> impl Iterator<Item = &PermissionRule> {
        self.rules.iter().filter(|rule| rule.is_wildcard())
    }
}
