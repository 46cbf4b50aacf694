//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validated.

mod agent;
mod logging;
mod permissions;
mod tools;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use permissions::FilePermissionsConfig;
pub use tools::FileToolsConfig;

use scholar_application::AgentConfig;
use scholar_domain::ConfigIssue;
use scholar_domain::tool::ToolSpec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when validation finds at least one error-severity issue
#[derive(Debug, Error)]
#[error("invalid configuration: {}", .issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub agent: FileAgentConfig,
    pub permissions: FilePermissionsConfig,
    pub tools: FileToolsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Zero limits and an OCR poll interval that cannot fit inside the
    /// timeout are errors. Permission-rule problems are warnings.
    pub fn validate(&self, spec: &ToolSpec) -> Vec<ConfigIssue> {
        let mut issues = self.agent.validate();
        issues.extend(self.tools.validate());
        issues.extend(self.permissions.validate(spec));
        issues
    }

    /// Validate, then split the issues: errors fail, warnings are returned.
    pub fn check(&self, spec: &ToolSpec) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate(spec).into_iter().partition(|i| i.is_error());
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }

    /// Request-scoped configuration without an approval channel; the
    /// caller attaches one with `with_permission_handler`.
    pub fn to_agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default()
            .with_limits(self.agent.limits())
            .with_max_content_chars(self.agent.max_content_chars)
            .with_permissions(self.permissions.to_rules());
        if let Some(library) = &self.agent.library {
            config = config.with_scope(library.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_application::tools::catalog::default_tool_spec;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[agent]
library = "L1"
max_iterations = 10
max_content_chars = 2000

[permissions]
require_approval_for_destructive = true

[[permissions.rules]]
pattern = "delete_item"
policy = "deny"

[tools]
web_enabled = false
ocr_poll_interval_ms = 250

[logging]
tool_events = "events.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.library.as_deref(), Some("L1"));
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.max_tool_retries, 3);
        assert!(!config.tools.web_enabled);
        assert_eq!(config.tools.ocr_timeout_ms, 60_000);

        let agent = config.to_agent_config();
        assert_eq!(agent.scope.as_deref(), Some("L1"));
        assert_eq!(agent.limits.max_iterations, 10);
        assert_eq!(agent.max_content_chars, 2000);
        assert!(agent.permissions.require_approval_for_destructive);
        assert_eq!(agent.permissions.exact("delete_item").unwrap().policy, "deny");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate(&default_tool_spec()).is_empty());
        assert!(config.to_agent_config().scope.is_none());
    }

    #[test]
    fn test_check_fails_on_errors_only() {
        let mut config = FileConfig::default();
        config.permissions.rules.push(scholar_application::PermissionRule {
            pattern: "delete_item".to_string(),
            policy: "sometimes".to_string(),
        });
        let warnings = config.check(&default_tool_spec()).unwrap();
        assert_eq!(warnings.len(), 1);

        config.agent.max_tool_retries = 0;
        let err = config.check(&default_tool_spec()).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(
            err.to_string(),
            "invalid configuration: agent.max_tool_retries must be > 0"
        );
    }
}
