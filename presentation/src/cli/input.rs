//! Call-file parsing for `run`.
//!
//! Accepts either a bare array of calls or an object with a `tool_calls`
//! array. `arguments` may be the raw JSON text the model produced or an
//! already-structured object; `input` is accepted as a synonym. Calls
//! without an `id` get `call_<n>` by position.
//!
//! ```json
//! [
//!   {"id": "a", "name": "search_library", "arguments": "{\"query\": \"engine\"}"},
//!   {"name": "collection", "input": {"action": "list"}}
//! ]
//! ```

use scholar_domain::tool::ToolCall;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallFileError {
    #[error("call file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("call file contains no tool calls")]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CallFile {
    Wrapped { tool_calls: Vec<RawCall> },
    Bare(Vec<RawCall>),
}

#[derive(Deserialize)]
struct RawCall {
    id: Option<String>,
    name: String,
    #[serde(default, alias = "input")]
    arguments: Option<Value>,
}

impl RawCall {
    fn into_call(self, position: usize) -> ToolCall {
        let id = self.id.unwrap_or_else(|| format!("call_{}", position + 1));
        let arguments = match self.arguments {
            None | Some(Value::Null) => String::new(),
            // Raw text goes to the parser untouched, malformed or not.
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        ToolCall::new(id, self.name, arguments)
    }
}

pub fn parse_call_file(content: &str) -> Result<Vec<ToolCall>, CallFileError> {
    let raw = match serde_json::from_str::<CallFile>(content)? {
        CallFile::Wrapped { tool_calls } => tool_calls,
        CallFile::Bare(calls) => calls,
    };
    if raw.is_empty() {
        return Err(CallFileError::Empty);
    }
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(i, call)| call.into_call(i))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_with_mixed_arguments() {
        let calls = parse_call_file(
            r#"[
                {"id": "a", "name": "search_library", "arguments": "{\"query\": \"engine\"}"},
                {"name": "collection", "input": {"action": "list"}},
                {"name": "get_context"}
            ]"#,
        )
        .unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].id, "a");
        assert_eq!(calls[0].arguments, r#"{"query": "engine"}"#);
        assert_eq!(calls[1].id, "call_2");
        assert_eq!(calls[1].arguments, r#"{"action":"list"}"#);
        assert_eq!(calls[2].arguments, "");
    }

    #[test]
    fn test_wrapped_form() {
        let calls =
            parse_call_file(r#"{"tool_calls": [{"name": "get_item", "arguments": {"item_id": "I1"}}]}"#)
                .unwrap();
        assert_eq!(calls[0].name, "get_item");
    }

    #[test]
    fn test_malformed_argument_text_is_preserved() {
        let calls = parse_call_file(r#"[{"name": "get_item", "arguments": "{item_id: I1"}]"#).unwrap();
        assert_eq!(calls[0].arguments, "{item_id: I1");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_call_file("[]"), Err(CallFileError::Empty)));
        assert!(matches!(parse_call_file("not json"), Err(CallFileError::Json(_))));
    }
}
