//! Partial-failure aggregation for bulk sub-actions.
//!
//! Bulk actions (`collection.add_item`, `collection.remove_item`,
//! `context.add`, `context.remove`) process every entry. A failing entry is
//! recorded and the loop moves on. The call itself succeeds with the
//! aggregate, even when no entry did.

use scholar_domain::tool::ToolResult;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Past-tense verb used as the count key, e.g. `added`
    verb: &'static str,
    total: usize,
    succeeded: usize,
    failed: Vec<(String, String)>,
}

impl BatchOutcome {
    pub fn new(verb: &'static str, total: usize) -> Self {
        Self {
            verb,
            total,
            succeeded: 0,
            failed: Vec::new(),
        }
    }

    pub fn record(&mut self, id: &str, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(message) => self.failed.push((id.to_string(), message)),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    /// Render the aggregate. `target` completes the summary, e.g.
    /// `to collection 'Reading'`.
    pub fn into_result(self, target: &str) -> ToolResult {
        let failed: Vec<_> = self
            .failed
            .iter()
            .map(|(id, error)| json!({ "id": id, "error": error }))
            .collect();
        let summary = format!(
            "{} {} of {} items {}",
            self.verb, self.succeeded, self.total, target
        );
        ToolResult::success(json!({
            self.verb: self.succeeded,
            "total": self.total,
            "failed": failed,
        }))
        .with_summary(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure() {
        let mut batch = BatchOutcome::new("added", 3);
        batch.record("I1", Ok(()));
        batch.record("I9", Err("item 'I9' not found".to_string()));
        batch.record("I2", Ok(()));

        let result = batch.into_result("to collection 'Reading'");
        assert!(result.is_success());
        let data = result.data().unwrap();
        assert_eq!(data["added"], 2);
        assert_eq!(data["total"], 3);
        assert_eq!(data["failed"][0]["id"], "I9");
        assert_eq!(result.summary(), Some("added 2 of 3 items to collection 'Reading'"));
    }

    #[test]
    fn test_all_failed_keeps_aggregate() {
        let mut batch = BatchOutcome::new("removed", 1);
        batch.record("I9", Err("item 'I9' is not in context".to_string()));
        let result = batch.into_result("from context");
        assert!(result.is_success());
        let data = result.data().unwrap();
        assert_eq!(data["removed"], 0);
        assert_eq!(data["total"], 1);
        assert_eq!(data["failed"][0]["error"], "item 'I9' is not in context");
        assert_eq!(result.summary(), Some("removed 0 of 1 items from context"));
    }
}
