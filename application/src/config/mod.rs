//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`AgentConfig`]: request-scoped settings shared by every tool call
//! - [`PermissionRules`]: allow / ask / deny overrides for destructive tools

pub mod agent_config;
pub mod permission_rules;

pub use agent_config::{AgentConfig, DEFAULT_MAX_CONTENT_CHARS};
pub use permission_rules::{PermissionRule, PermissionRules};
