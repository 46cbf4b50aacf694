//! Sensitivity levels and permission policies.
//!
//! Every tool carries exactly one [`SensitivityLevel`] describing its blast
//! radius. Only [`SensitivityLevel::Destructive`] tools consult a
//! [`PermissionPolicy`]; read and write tools always execute.
//!
//! | Level | Examples | Gate |
//! |-------|----------|------|
//! | **Read** | `search_library`, `web`, `academic` | Always execute |
//! | **Write** | `collection`, `note`, `move_item` | Always execute |
//! | **Destructive** | `delete_item`, `delete_collection` | allow / ask / deny |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Blast radius of a tool, used only for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    /// No side effects on the knowledge base
    Read,
    /// Modifies state, but is not gated
    Write,
    /// Irreversible removal, gated by the permission policy
    Destructive,
}

impl SensitivityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SensitivityLevel::Read => "read",
            SensitivityLevel::Write => "write",
            SensitivityLevel::Destructive => "destructive",
        }
    }

    /// Level assigned to names that have no registry entry.
    pub fn unknown_default() -> Self {
        SensitivityLevel::Destructive
    }

    pub fn requires_policy(&self) -> bool {
        matches!(self, SensitivityLevel::Destructive)
    }
}

impl std::fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy applied to a destructive tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    Allow,
    Ask,
    Deny,
}

impl PermissionPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            PermissionPolicy::Allow => "allow",
            PermissionPolicy::Ask => "ask",
            PermissionPolicy::Deny => "deny",
        }
    }

    /// Parse a policy string, reporting whether it was recognised.
    ///
    /// Anything other than `allow` / `ask` / `deny` (case-insensitive)
    /// maps to [`PermissionPolicy::Deny`].
    pub fn parse_lenient(s: &str) -> (Self, bool) {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => (PermissionPolicy::Allow, true),
            "ask" => (PermissionPolicy::Ask, true),
            "deny" => (PermissionPolicy::Deny, true),
            _ => (PermissionPolicy::Deny, false),
        }
    }
}

impl FromStr for PermissionPolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s).0)
    }
}

impl std::fmt::Display for PermissionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_destructive_requires_policy() {
        assert!(!SensitivityLevel::Read.requires_policy());
        assert!(!SensitivityLevel::Write.requires_policy());
        assert!(SensitivityLevel::Destructive.requires_policy());
    }

    #[test]
    fn test_unknown_default_is_most_conservative() {
        assert_eq!(SensitivityLevel::unknown_default(), SensitivityLevel::Destructive);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("allow".parse::<PermissionPolicy>().unwrap(), PermissionPolicy::Allow);
        assert_eq!(" ASK ".parse::<PermissionPolicy>().unwrap(), PermissionPolicy::Ask);
        assert_eq!("deny".parse::<PermissionPolicy>().unwrap(), PermissionPolicy::Deny);
    }

    #[test]
    fn test_unrecognised_policy_is_deny() {
        assert_eq!(
            PermissionPolicy::parse_lenient("yes please"),
            (PermissionPolicy::Deny, false)
        );
        assert_eq!("".parse::<PermissionPolicy>().unwrap(), PermissionPolicy::Deny);
    }

    #[test]
    fn test_sensitivity_serde() {
        let json = serde_json::to_string(&SensitivityLevel::Destructive).unwrap();
        assert_eq!(json, "\"destructive\"");
    }
}
