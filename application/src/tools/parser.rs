//! Tool call envelope parsing.
//!
//! Turns the raw argument text of a [`ToolCall`] into a JSON object. A
//! failure here is an envelope error: the model produced text that is not a
//! JSON object at all, which is a different problem from well-formed
//! arguments that break the schema.

use scholar_domain::tool::{ToolCall, ToolError};
use serde_json::{Map, Value};

/// A call whose argument text decoded to a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Map<String, Value>,
}

pub fn parse_tool_call(call: &ToolCall) -> Result<ParsedToolCall, ToolError> {
    Ok(ParsedToolCall {
        id: call.id.clone(),
        name: call.name.clone(),
        arguments: parse_arguments(&call.name, &call.arguments)?,
    })
}

/// Decode argument text. Empty or whitespace-only text means `{}`.
pub fn parse_arguments(tool_name: &str, text: &str) -> Result<Map<String, Value>, ToolError> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ToolError::envelope(format!(
            "Arguments for tool '{}' must be a JSON object, received {}",
            tool_name,
            kind_of(&other)
        ))),
        Err(e) => Err(ToolError::envelope(format!(
            "Invalid JSON arguments for tool '{}': {}",
            tool_name, e
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::tool::ToolErrorKind;

    #[test]
    fn test_parse_object() {
        let call = ToolCall::new("c1", "get_item", r#"{"item_id": "I1"}"#);
        let parsed = parse_tool_call(&call).unwrap();
        assert_eq!(parsed.id, "c1");
        assert_eq!(parsed.arguments["item_id"], "I1");
    }

    #[test]
    fn test_parse_empty_is_empty_object() {
        assert!(parse_arguments("context", "").unwrap().is_empty());
        assert!(parse_arguments("context", "  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_is_envelope_error() {
        let err = parse_arguments("get_item", r#"{"item_id": "#).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Envelope);
        assert!(err.message.starts_with("Invalid JSON arguments for tool 'get_item': "));
        assert!(err.message.contains("EOF"));
    }

    #[test]
    fn test_parse_non_object_is_envelope_error() {
        let err = parse_arguments("get_item", "[1, 2]").unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Envelope);
        assert_eq!(
            err.message,
            "Arguments for tool 'get_item' must be a JSON object, received array"
        );

        let err = parse_arguments("get_item", "null").unwrap_err();
        assert!(err.message.ends_with("received null"));
    }
}
