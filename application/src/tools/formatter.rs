//! Result envelope formatting.
//!
//! The single place that decides what the conversation protocol sees for a
//! [`ToolResult`]. Failures carry `success` and `error` only, whatever the
//! handler attached.

use scholar_domain::tool::ToolResult;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

pub fn format_result(result: &ToolResult) -> Value {
    if !result.is_success() {
        let message = result
            .error()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "tool call failed without an error message".to_string());
        return json!({ "success": false, "error": message });
    }

    let mut envelope = Map::new();
    envelope.insert("success".to_string(), Value::Bool(true));
    if let Some(data) = result.data() {
        envelope.insert("data".to_string(), data.clone());
    }
    if let Some(summary) = result.summary() {
        envelope.insert("summary".to_string(), Value::String(summary.to_string()));
    }
    Value::Object(envelope)
}

/// Compact JSON text fed back into the conversation.
pub fn format_result_string(result: &ToolResult) -> String {
    format_result(result).to_string()
}

/// Envelopes for a whole batch, keyed by call id.
pub fn format_results(results: &HashMap<String, ToolResult>) -> Value {
    let mut ids: Vec<&String> = results.keys().collect();
    ids.sort();
    let map: Map<String, Value> = ids
        .into_iter()
        .map(|id| (id.clone(), format_result(&results[id])))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::tool::ToolError;

    #[test]
    fn test_success_envelope() {
        let result = ToolResult::success(json!({"count": 1})).with_summary("found 1 item");
        assert_eq!(
            format_result(&result),
            json!({"success": true, "data": {"count": 1}, "summary": "found 1 item"})
        );
    }

    #[test]
    fn test_success_without_payload_omits_fields() {
        assert_eq!(format_result(&ToolResult::done()), json!({"success": true}));
    }

    #[test]
    fn test_failure_envelope_drops_summary() {
        let result = ToolResult::failure(ToolError::handler("collection 'C9' not found"))
            .with_summary("tried to add 3 items");
        assert_eq!(
            format_result(&result),
            json!({"success": false, "error": "collection 'C9' not found"})
        );
    }

    #[test]
    fn test_format_results_keyed_by_id() {
        let mut results = HashMap::new();
        results.insert("b".to_string(), ToolResult::done());
        results.insert(
            "a".to_string(),
            ToolResult::failure(ToolError::not_found("Unknown tool: x")),
        );
        let value = format_results(&results);
        assert_eq!(value["a"]["success"], false);
        assert_eq!(value["b"]["success"], true);
        assert_eq!(format_result_string(&results["b"]), r#"{"success":true}"#);
    }
}
