//! JSONL file writer for tool events.
//!
//! Each [`ToolEvent`] becomes one JSON line carrying `type` and
//! `timestamp` next to the event payload. The file is opened in append
//! mode so several sessions can share one audit log.

use scholar_application::ports::tool_event_logger::{ToolEvent, ToolEventLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Tool event logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record
/// and on `Drop`.
pub struct JsonlToolEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlToolEventLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; audit logging is then
    /// skipped rather than failing the session.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create tool event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open tool event log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ToolEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        match event.payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event.event_type.to_string()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl ToolEventLogger for JsonlToolEventLogger {
    fn log(&self, event: ToolEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlToolEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit").join("tools.jsonl");
        let logger = JsonlToolEventLogger::new(&path).unwrap();

        logger.log(ToolEvent::new(
            "tool_call",
            json!({"call_id": "c1", "tool": "note", "requested": "notes"}),
        ));
        logger.log(ToolEvent::new(
            "tool_denied",
            json!({"call_id": "c2", "tool": "delete_item", "sensitivity": "destructive"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "tool_call");
        assert_eq!(records[0]["requested"], "notes");
        assert_eq!(records[1]["tool"], "delete_item");
        assert!(records.iter().all(|r| r["timestamp"].is_string()));
    }

    #[test]
    fn test_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.jsonl");
        for id in ["c1", "c2"] {
            let logger = JsonlToolEventLogger::new(&path).unwrap();
            logger.log(ToolEvent::new("tool_call", json!({"call_id": id})));
        }
        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["call_id"], "c2");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.jsonl");
        let logger = JsonlToolEventLogger::new(&path).unwrap();
        logger.log(ToolEvent::new("note", json!("free text")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "free text");
    }
}
