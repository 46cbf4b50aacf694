//! Permission configuration from TOML (`[permissions]` section)

use scholar_application::config::{PermissionRule, PermissionRules};
use scholar_domain::tool::{PermissionPolicy, ToolSpec};
use scholar_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw permission configuration from TOML
///
/// Rules are an array so their declaration order survives loading; the
/// first matching wildcard wins.
///
/// # Example
///
/// ```toml
/// [permissions]
/// require_approval_for_destructive = true
///
/// [[permissions.rules]]
/// pattern = "delete_item"
/// policy = "deny"
///
/// [[permissions.rules]]
/// pattern = "delete_*"
/// policy = "ask"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePermissionsConfig {
    pub require_approval_for_destructive: bool,
    pub rules: Vec<PermissionRule>,
}

impl FilePermissionsConfig {
    pub fn to_rules(&self) -> PermissionRules {
        PermissionRules {
            require_approval_for_destructive: self.require_approval_for_destructive,
            rules: self.rules.clone(),
        }
    }

    /// Problems here never widen access: a bad policy behaves as `deny` and a
    /// bad pattern matches nothing. They are reported as warnings.
    pub fn validate(&self, spec: &ToolSpec) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for rule in &self.rules {
            if !PermissionPolicy::parse_lenient(&rule.policy).1 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownPermissionPolicy,
                    format!(
                        "permissions rule '{}': unknown policy '{}', treated as deny",
                        rule.pattern, rule.policy
                    ),
                ));
            }

            if rule.is_wildcard() {
                if let Err(e) = glob::Pattern::new(&rule.pattern) {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::InvalidRulePattern,
                        format!(
                            "permissions rule '{}': invalid pattern ({}), rule ignored",
                            rule.pattern, e.msg
                        ),
                    ));
                }
            } else if !spec.contains(&rule.pattern) {
                // Rules are matched against canonical names only.
                let message = match spec.resolve_alias(&rule.pattern) {
                    Some(canonical) => format!(
                        "permissions rule '{}': '{}' is an alias, use '{}'",
                        rule.pattern, rule.pattern, canonical
                    ),
                    None => format!("permissions rule '{}': no tool with that name", rule.pattern),
                };
                issues.push(ConfigIssue::warning(ConfigIssueCode::UnknownRuleTarget, message));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_application::tools::catalog::default_tool_spec;

    #[test]
    fn test_rules_keep_declaration_order() {
        let toml_str = r#"
require_approval_for_destructive = true

[[rules]]
pattern = "delete_*"
policy = "ask"

[[rules]]
pattern = "*"
policy = "deny"
"#;
        let config: FilePermissionsConfig = toml::from_str(toml_str).unwrap();
        let rules = config.to_rules();
        assert!(rules.require_approval_for_destructive);
        let patterns: Vec<_> = rules.wildcards().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["delete_*", "*"]);
    }

    #[test]
    fn test_validate_reports_warnings_only() {
        let config = FilePermissionsConfig {
            require_approval_for_destructive: false,
            rules: vec![
                PermissionRule {
                    pattern: "delete_item".to_string(),
                    policy: "maybe".to_string(),
                },
                PermissionRule {
                    pattern: "[delete".to_string(),
                    policy: "ask".to_string(),
                },
                PermissionRule {
                    pattern: "drop_table".to_string(),
                    policy: "deny".to_string(),
                },
            ],
        };
        let issues = config.validate(&default_tool_spec());
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::UnknownPermissionPolicy,
                ConfigIssueCode::InvalidRulePattern,
                ConfigIssueCode::UnknownRuleTarget,
            ]
        );
        assert!(issues.iter().all(|i| !i.is_error()));
    }

    #[test]
    fn test_alias_target_points_at_canonical_name() {
        let config = FilePermissionsConfig {
            require_approval_for_destructive: false,
            rules: vec![
                PermissionRule {
                    pattern: "delete_item".to_string(),
                    policy: "allow".to_string(),
                },
                PermissionRule {
                    pattern: "notes".to_string(),
                    policy: "allow".to_string(),
                },
            ],
        };
        let issues = config.validate(&default_tool_spec());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "permissions rule 'notes': 'notes' is an alias, use 'note'"
        );
    }
}
