//! Tool backend configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! web_enabled = true
//! user_agent = "scholar-agent/0.4"
//! request_timeout_secs = 30
//! semantic_scholar_url = "https://api.semanticscholar.org/graph/v1"
//! ocr_poll_interval_ms = 500
//! ocr_timeout_ms = 60000
//! ```

use scholar_application::HandlerSettings;
use scholar_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Use the network-backed web and academic adapters
    pub web_enabled: bool,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub semantic_scholar_url: String,
    pub ocr_poll_interval_ms: u64,
    pub ocr_timeout_ms: u64,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        let handler = HandlerSettings::default();
        Self {
            web_enabled: true,
            user_agent: concat!("scholar-agent/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 30,
            semantic_scholar_url: "https://api.semanticscholar.org/graph/v1".to_string(),
            ocr_poll_interval_ms: handler.ocr_poll_interval.as_millis() as u64,
            ocr_timeout_ms: handler.ocr_timeout.as_millis() as u64,
        }
    }
}

impl FileToolsConfig {
    pub fn handler_settings(&self) -> HandlerSettings {
        HandlerSettings {
            ocr_poll_interval: Duration::from_millis(self.ocr_poll_interval_ms),
            ocr_timeout: Duration::from_millis(self.ocr_timeout_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("tools.request_timeout_secs", self.request_timeout_secs),
            ("tools.ocr_poll_interval_ms", self.ocr_poll_interval_ms),
            ("tools.ocr_timeout_ms", self.ocr_timeout_ms),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroLimit,
                    format!("{} must be > 0", field),
                ));
            }
        }
        if self.ocr_poll_interval_ms >= self.ocr_timeout_ms && self.ocr_timeout_ms > 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::PollIntervalExceedsTimeout,
                format!(
                    "tools.ocr_poll_interval_ms ({}) must be shorter than tools.ocr_timeout_ms ({})",
                    self.ocr_poll_interval_ms, self.ocr_timeout_ms
                ),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_handler_settings() {
        let config = FileToolsConfig::default();
        assert_eq!(config.handler_settings(), HandlerSettings::default());
        assert!(config.validate().is_empty());
        assert!(config.user_agent.starts_with("scholar-agent/"));
    }

    #[test]
    fn test_poll_interval_must_be_shorter_than_timeout() {
        let config = FileToolsConfig {
            ocr_poll_interval_ms: 5000,
            ocr_timeout_ms: 5000,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::PollIntervalExceedsTimeout);
    }

    #[test]
    fn test_zero_timeout() {
        let config = FileToolsConfig {
            ocr_timeout_ms: 0,
            ..Default::default()
        };
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![ConfigIssueCode::ZeroLimit]);
    }
}
