//! Structured configuration diagnostics.
//!
//! Loaders report problems as [`ConfigIssue`]s instead of failing outright,
//! so the binary can print warnings and only abort on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A permission rule value is not allow / ask / deny.
    UnknownPermissionPolicy,
    /// A wildcard permission rule is not a valid glob pattern.
    InvalidRulePattern,
    /// A permission rule names a tool that is not in the catalog.
    UnknownRuleTarget,
    /// A numeric limit is zero.
    ZeroLimit,
    /// OCR poll interval is not shorter than the OCR timeout.
    PollIntervalExceedsTimeout,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::UnknownPermissionPolicy,
            "permissions.rules.delete_item = \"maybe\" is not a policy; treated as deny",
        );
        assert!(!issue.is_error());
        assert!(issue.to_string().starts_with("warning: "));

        let issue = ConfigIssue::error(ConfigIssueCode::ZeroLimit, "agent.max_iterations must be > 0");
        assert!(issue.is_error());
    }
}
