//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! directory = "~/.local/share/scholar-agent/logs"   # daily-rotated diagnostic log
//! tool_events = "./tool-events.jsonl"               # one JSON line per tool event
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the rotated diagnostic log; unset disables file logging
    pub directory: Option<PathBuf>,
    /// JSONL file receiving tool_call / tool_result events
    pub tool_events: Option<PathBuf>,
}

impl FileLoggingConfig {
    pub fn directory(&self) -> Option<PathBuf> {
        self.directory.as_deref().map(expand_home)
    }

    pub fn tool_events(&self) -> Option<PathBuf> {
        self.tool_events.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = FileLoggingConfig::default();
        assert!(config.directory().is_none());
        assert!(config.tool_events().is_none());
    }

    #[test]
    fn test_expand_home() {
        let config = FileLoggingConfig {
            directory: Some(PathBuf::from("~/logs")),
            tool_events: Some(PathBuf::from("/tmp/events.jsonl")),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.directory(), Some(home.join("logs")));
        }
        assert_eq!(config.tool_events(), Some(PathBuf::from("/tmp/events.jsonl")));
    }
}
