//! Tool domain traits
//!
//! Contains the pure validation logic that turns a decoded argument object
//! into [`ValidatedArguments`]. The async execution port is defined in the
//! application layer (ports).

use super::arguments::ValidatedArguments;
use super::entities::ToolDefinition;
use super::schema::Violation;
use serde_json::{Map, Value};
use thiserror::Error;

/// Rejection produced when arguments violate a registered schema.
///
/// Renders as the compact `path: message; path: message` form that is
/// replayed to the model as corrective feedback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid arguments for tool '{tool_name}': {}", join_violations(.violations))]
pub struct ValidationFailure {
    pub tool_name: String,
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(tool_name: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            tool_name: tool_name.into(),
            violations,
        }
    }

    /// `path: message; path: message`
    pub fn compact(&self) -> String {
        join_violations(&self.violations)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.path.as_str())
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validator for tool arguments
///
/// `definition` is `None` when the name has no catalog entry; such calls
/// pass through unchecked so newly added tools keep working.
pub trait ToolValidator {
    fn validate(
        &self,
        tool_name: &str,
        definition: Option<&ToolDefinition>,
        arguments: Map<String, Value>,
    ) -> Result<ValidatedArguments, ValidationFailure>;
}

/// Default implementation of ToolValidator, driven by [`ToolDefinition::schema`]
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        tool_name: &str,
        definition: Option<&ToolDefinition>,
        arguments: Map<String, Value>,
    ) -> Result<ValidatedArguments, ValidationFailure> {
        let Some(definition) = definition else {
            return Ok(ValidatedArguments::Unchecked(arguments));
        };

        match definition.schema.check(&arguments) {
            Ok(Some(normalized)) => Ok(ValidatedArguments::Checked(normalized)),
            Ok(None) => Ok(ValidatedArguments::Unchecked(arguments)),
            Err(violations) => Err(ValidationFailure::new(tool_name, violations)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::{ObjectSchema, ParamKind, ParameterSchema, Refinement, ToolParameter};
    use crate::tool::sensitivity::SensitivityLevel;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn note_create() -> ToolDefinition {
        ToolDefinition::new("create_note", "Create a note", SensitivityLevel::Write)
            .with_parameter(ToolParameter::required("content", "Body", ParamKind::non_empty_string()))
            .with_parameter(ToolParameter::optional("parent_item_id", "Parent", ParamKind::string()))
            .with_parameter(ToolParameter::optional("collection_id", "Collection", ParamKind::string()))
            .with_refinement(Refinement::at_least_one_of(&["parent_item_id", "collection_id"]))
    }

    #[test]
    fn test_validator_checked() {
        let validator = DefaultToolValidator;
        let def = note_create();
        let out = validator
            .validate("create_note", Some(&def), args(json!({"content": "x", "collection_id": "C1"})))
            .unwrap();
        assert!(out.is_checked());
    }

    #[test]
    fn test_validator_refinement_failure() {
        let validator = DefaultToolValidator;
        let def = note_create();
        let err = validator
            .validate("create_note", Some(&def), args(json!({"content": "x"})))
            .unwrap_err();
        assert_eq!(err.paths().collect::<Vec<_>>(), vec!["parent_item_id"]);
        assert_eq!(
            err.to_string(),
            format!("Invalid arguments for tool 'create_note': {}", err.compact())
        );
        assert!(err.to_string().contains("parent_item_id: "));
    }

    #[test]
    fn test_validator_compact_format() {
        let validator = DefaultToolValidator;
        let def = note_create();
        let err = validator
            .validate("create_note", Some(&def), args(json!({"content": 3, "bogus": 1})))
            .unwrap_err();
        assert_eq!(
            err.compact(),
            "bogus: unrecognized field (expected: content, parent_item_id, collection_id); \
             content: expected string, received number"
        );
    }

    #[test]
    fn test_validator_unknown_tool_passes_through() {
        let validator = DefaultToolValidator;
        let out = validator
            .validate("brand_new_tool", None, args(json!({"anything": [1, 2]})))
            .unwrap();
        assert!(!out.is_checked());
        assert_eq!(out.get("anything"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_validator_open_schema_passes_through() {
        let validator = DefaultToolValidator;
        let def = ToolDefinition::new("plugin", "Plugin", SensitivityLevel::Read)
            .with_schema(ParameterSchema::Open);
        let out = validator
            .validate("plugin", Some(&def), args(json!({"free": "form"})))
            .unwrap();
        assert!(!out.is_checked());
    }

    #[test]
    fn test_validator_no_params_rejects_extras() {
        let validator = DefaultToolValidator;
        let def = ToolDefinition::new("ping", "Ping", SensitivityLevel::Read)
            .with_schema(ParameterSchema::Object(ObjectSchema::new()));
        assert!(validator.validate("ping", Some(&def), Map::new()).is_ok());
        assert!(validator
            .validate("ping", Some(&def), args(json!({"x": 1})))
            .is_err());
    }
}
