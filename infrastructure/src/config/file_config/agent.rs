//! Agent configuration from TOML (`[agent]` section)

use scholar_domain::{AgentLimits, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// library = "L1"              # bind the session to one library
/// max_iterations = 25
/// max_tool_retries = 3
/// max_content_chars = 50000   # cap on fetched page / PDF text
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Library scope; unset means every visible library
    pub library: Option<String>,
    pub max_iterations: usize,
    pub max_tool_retries: usize,
    pub max_content_chars: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let limits = AgentLimits::default();
        Self {
            library: None,
            max_iterations: limits.max_iterations,
            max_tool_retries: limits.max_tool_retries,
            max_content_chars: scholar_application::config::DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

impl FileAgentConfig {
    pub fn limits(&self) -> AgentLimits {
        AgentLimits {
            max_iterations: self.max_iterations,
            max_tool_retries: self.max_tool_retries,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("agent.max_iterations", self.max_iterations),
            ("agent.max_tool_retries", self.max_tool_retries),
            ("agent.max_content_chars", self.max_content_chars),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| {
            ConfigIssue::error(ConfigIssueCode::ZeroLimit, format!("{} must be > 0", field))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_agent_limits() {
        let config = FileAgentConfig::default();
        assert_eq!(config.limits(), AgentLimits::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_limits_are_errors() {
        let config = FileAgentConfig {
            max_iterations: 0,
            max_content_chars: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
        assert_eq!(issues[0].message, "agent.max_iterations must be > 0");
    }
}
