//! Permission gate for tool calls.
//!
//! Gating is two-tier. Read and write tools always run. Destructive tools
//! consult [`PermissionRules`] in this order:
//!
//! 1. a rule naming the tool exactly
//! 2. the first declared wildcard rule whose glob matches
//! 3. the fallback: `allow`, or `ask` when
//!    `require_approval_for_destructive` is set
//!
//! Every path that cannot positively establish consent ends in denial: an
//! unrecognised policy string, `ask` with no approval channel, and an
//! approval channel that errors.

use crate::config::{AgentConfig, PermissionRules};
use glob::Pattern;
use scholar_domain::tool::{PermissionPolicy, SensitivityLevel};
use tracing::{debug, warn};

/// Where a resolved policy came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    Exact,
    Wildcard(String),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyResolution {
    pub policy: PermissionPolicy,
    pub source: PolicySource,
    /// The configured text when it was not a recognised policy
    pub unrecognized: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied(String),
}

impl PermissionDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionDecision::Granted)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the policy for a destructive tool.
    pub fn resolve_policy(rules: &PermissionRules, tool_name: &str) -> PolicyResolution {
        if let Some(rule) = rules.exact(tool_name) {
            return Self::from_text(&rule.policy, PolicySource::Exact);
        }

        for rule in rules.wildcards() {
            match Pattern::new(&rule.pattern) {
                Ok(pattern) if pattern.matches(tool_name) => {
                    return Self::from_text(&rule.policy, PolicySource::Wildcard(rule.pattern.clone()));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Ignoring invalid permission pattern '{}': {}", rule.pattern, e);
                }
            }
        }

        let policy = if rules.require_approval_for_destructive {
            PermissionPolicy::Ask
        } else {
            PermissionPolicy::Allow
        };
        PolicyResolution {
            policy,
            source: PolicySource::Fallback,
            unrecognized: None,
        }
    }

    fn from_text(text: &str, source: PolicySource) -> PolicyResolution {
        let (policy, recognized) = PermissionPolicy::parse_lenient(text);
        PolicyResolution {
            policy,
            source,
            unrecognized: (!recognized).then(|| text.to_string()),
        }
    }

    /// Decide whether one call may run.
    ///
    /// Only an `ask` policy suspends; other calls of the same batch keep
    /// running meanwhile.
    pub async fn authorize(
        &self,
        call_id: &str,
        tool_name: &str,
        level: SensitivityLevel,
        config: &AgentConfig,
    ) -> PermissionDecision {
        if !level.requires_policy() {
            return PermissionDecision::Granted;
        }

        let resolution = Self::resolve_policy(&config.permissions, tool_name);
        debug!(
            "Permission for {} ({}): {} via {:?}",
            tool_name, call_id, resolution.policy, resolution.source
        );

        match resolution.policy {
            PermissionPolicy::Allow => PermissionDecision::Granted,
            PermissionPolicy::Deny => {
                let reason = match &resolution.unrecognized {
                    Some(text) => {
                        warn!(
                            "Unrecognised permission policy '{}' for {}, denying",
                            text, tool_name
                        );
                        format!(
                            "Tool '{}' is denied by permission policy ('{}' is not a recognised policy)",
                            tool_name, text
                        )
                    }
                    None => format!("Tool '{}' is denied by permission policy", tool_name),
                };
                PermissionDecision::Denied(reason)
            }
            PermissionPolicy::Ask => {
                let Some(handler) = &config.permission_handler else {
                    warn!(
                        "Tool {} requires approval but no permission handler is configured",
                        tool_name
                    );
                    return PermissionDecision::Denied(format!(
                        "Tool '{}' requires approval but no approval channel is configured",
                        tool_name
                    ));
                };
                match handler.request_permission(call_id, tool_name).await {
                    Ok(true) => PermissionDecision::Granted,
                    Ok(false) => PermissionDecision::Denied(format!(
                        "User declined permission for tool '{}'",
                        tool_name
                    )),
                    Err(e) => {
                        warn!("Permission request for {} failed: {}", tool_name, e);
                        PermissionDecision::Denied(format!(
                            "Permission request for tool '{}' failed: {}",
                            tool_name, e
                        ))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::permission_handler::{
        AutoApprovePermission, AutoDenyPermission, PermissionHandler, PermissionHandlerError,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct BrokenChannel;

    #[async_trait]
    impl PermissionHandler for BrokenChannel {
        async fn request_permission(
            &self,
            _call_id: &str,
            _tool_name: &str,
        ) -> Result<bool, PermissionHandlerError> {
            Err(PermissionHandlerError::Cancelled)
        }
    }

    fn config(rules: PermissionRules) -> AgentConfig {
        AgentConfig::default().with_permissions(rules)
    }

    #[test]
    fn test_resolution_order() {
        let rules = PermissionRules::new()
            .with_rule("*", "deny")
            .with_rule("delete_item", "allow");

        let exact = PermissionGate::resolve_policy(&rules, "delete_item");
        assert_eq!(exact.policy, PermissionPolicy::Allow);
        assert_eq!(exact.source, PolicySource::Exact);

        let wildcard = PermissionGate::resolve_policy(&rules, "delete_collection");
        assert_eq!(wildcard.policy, PermissionPolicy::Deny);
        assert_eq!(wildcard.source, PolicySource::Wildcard("*".to_string()));
    }

    #[test]
    fn test_first_declared_wildcard_wins() {
        let rules = PermissionRules::new()
            .with_rule("delete_*", "ask")
            .with_rule("*", "deny");
        let resolution = PermissionGate::resolve_policy(&rules, "delete_collection");
        assert_eq!(resolution.policy, PermissionPolicy::Ask);
    }

    #[test]
    fn test_fallback_follows_require_approval_flag() {
        let rules = PermissionRules::new();
        assert_eq!(
            PermissionGate::resolve_policy(&rules, "delete_item").policy,
            PermissionPolicy::Allow
        );
        let rules = rules.with_require_approval_for_destructive(true);
        let resolution = PermissionGate::resolve_policy(&rules, "delete_item");
        assert_eq!(resolution.policy, PermissionPolicy::Ask);
        assert_eq!(resolution.source, PolicySource::Fallback);
    }

    #[test]
    fn test_unrecognized_policy_is_deny() {
        let rules = PermissionRules::new().with_rule("delete_item", "sometimes");
        let resolution = PermissionGate::resolve_policy(&rules, "delete_item");
        assert_eq!(resolution.policy, PermissionPolicy::Deny);
        assert_eq!(resolution.unrecognized.as_deref(), Some("sometimes"));
    }

    #[tokio::test]
    async fn test_read_and_write_always_granted() {
        let gate = PermissionGate::new();
        let config = config(
            PermissionRules::new()
                .with_rule("*", "deny")
                .with_require_approval_for_destructive(true),
        );
        for level in [SensitivityLevel::Read, SensitivityLevel::Write] {
            let decision = gate.authorize("c1", "note", level, &config).await;
            assert_eq!(decision, PermissionDecision::Granted);
        }
    }

    #[tokio::test]
    async fn test_deny_policy() {
        let gate = PermissionGate::new();
        let config = config(PermissionRules::new().with_rule("delete_item", "deny"));
        let decision = gate
            .authorize("c1", "delete_item", SensitivityLevel::Destructive, &config)
            .await;
        assert_eq!(
            decision,
            PermissionDecision::Denied("Tool 'delete_item' is denied by permission policy".to_string())
        );
    }

    #[tokio::test]
    async fn test_ask_without_handler_fails_closed() {
        let gate = PermissionGate::new();
        let config = config(PermissionRules::new().with_rule("delete_item", "ask"));
        let decision = gate
            .authorize("c1", "delete_item", SensitivityLevel::Destructive, &config)
            .await;
        assert!(!decision.is_granted());
    }

    #[tokio::test]
    async fn test_ask_consults_handler() {
        let gate = PermissionGate::new();
        let rules = PermissionRules::new().with_rule("delete_item", "ask");

        let approve = config(rules.clone()).with_permission_handler(Arc::new(AutoApprovePermission));
        assert!(gate
            .authorize("c1", "delete_item", SensitivityLevel::Destructive, &approve)
            .await
            .is_granted());

        let deny = config(rules.clone()).with_permission_handler(Arc::new(AutoDenyPermission));
        assert_eq!(
            gate.authorize("c1", "delete_item", SensitivityLevel::Destructive, &deny)
                .await,
            PermissionDecision::Denied("User declined permission for tool 'delete_item'".to_string())
        );

        let broken = config(rules).with_permission_handler(Arc::new(BrokenChannel));
        assert!(!gate
            .authorize("c1", "delete_item", SensitivityLevel::Destructive, &broken)
            .await
            .is_granted());
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_skipped() {
        let gate = PermissionGate::new();
        let config = config(
            PermissionRules::new()
                .with_rule("delete_[", "deny")
                .with_rule("delete_*", "allow"),
        );
        assert!(gate
            .authorize("c1", "delete_item", SensitivityLevel::Destructive, &config)
            .await
            .is_granted());
    }
}
