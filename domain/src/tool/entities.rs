//! Tool domain entities

use super::schema::{ActionVariant, ObjectSchema, ParameterSchema, Refinement, ToolParameter};
use super::sensitivity::SensitivityLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Definition of a tool that can be called by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "search_library")
    pub name: String,
    /// Natural-language description shown to the model
    pub description: String,
    /// Blast radius used by the permission gate
    pub sensitivity: SensitivityLevel,
    /// Declared argument shape
    pub schema: ParameterSchema,
    /// Replacement hint for deprecated single-verb tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sensitivity: SensitivityLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sensitivity,
            schema: ParameterSchema::default(),
            deprecated: None,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        match &mut self.schema {
            ParameterSchema::Object(object) => object.parameters.push(param),
            _ => self.schema = ParameterSchema::Object(ObjectSchema::new().with_parameter(param)),
        }
        self
    }

    pub fn with_refinement(mut self, refinement: Refinement) -> Self {
        if let ParameterSchema::Object(object) = &mut self.schema {
            object.refinements.push(refinement);
        }
        self
    }

    pub fn with_schema(mut self, schema: ParameterSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_action(mut self, variant: ActionVariant) -> Self {
        match &mut self.schema {
            ParameterSchema::Actions { variants } => variants.push(variant),
            _ => self.schema = ParameterSchema::actions(vec![variant]),
        }
        self
    }

    /// Mark this tool as a deprecated alias of a consolidated tool.
    pub fn deprecated_for(mut self, replacement: impl Into<String>) -> Self {
        self.deprecated = Some(replacement.into());
        self
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    pub fn is_unified(&self) -> bool {
        matches!(self.schema, ParameterSchema::Actions { .. })
    }
}

/// Immutable registry of every tool surfaced to the model.
///
/// Doubles as the parameter-schema registry and the sensitivity registry:
/// each name maps to exactly one definition carrying both.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "notes" → "note")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    /// Register a single alias mapping (builder pattern)
    pub fn register_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Register multiple aliases at once (builder pattern)
    pub fn register_aliases(
        mut self,
        mappings: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        for (alias, canonical) in mappings {
            self.aliases.insert(alias.into(), canonical.into());
        }
        self
    }

    /// Resolve an alias to its canonical name (aliases only, not canonical names)
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_str())
    }

    /// Resolve a name: returns canonical name if it's a registered tool,
    /// or resolves alias, or None if unknown
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.contains_key(name) {
            Some(name)
        } else {
            self.resolve_alias(name)
        }
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.tools.get(canonical))
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Sensitivity of a tool; unknown names get the most conservative level.
    pub fn sensitivity(&self, name: &str) -> SensitivityLevel {
        self.tools
            .get(name)
            .map(|t| t.sensitivity)
            .unwrap_or_else(SensitivityLevel::unknown_default)
    }

    /// Consolidated (non-deprecated) tools
    pub fn current_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(|t| !t.is_deprecated())
    }

    pub fn deprecated_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(|t| t.is_deprecated())
    }

    pub fn tools_at(&self, level: SensitivityLevel) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(move |t| t.sensitivity == level)
    }
}

/// A tool call emitted by the model: name plus raw argument text.
///
/// The argument payload is kept exactly as the model produced it; decoding
/// happens in the executor so that malformed text becomes a structured error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back with the result
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Serialized JSON arguments
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Build a call from an already-structured argument value.
    pub fn with_json(id: impl Into<String>, name: impl Into<String>, arguments: &serde_json::Value) -> Self {
        Self::new(id, name, arguments.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::ParamKind;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("get_item", "Fetch one library item", SensitivityLevel::Read)
            .with_parameter(ToolParameter::required("item_id", "Item id", ParamKind::non_empty_string()));

        assert_eq!(tool.name, "get_item");
        assert!(!tool.is_unified());
        assert!(!tool.is_deprecated());
        match &tool.schema {
            ParameterSchema::Object(o) => assert_eq!(o.parameters[0].name, "item_id"),
            other => panic!("unexpected schema: {:?}", other),
        }
    }

    #[test]
    fn test_with_action_builds_union() {
        let tool = ToolDefinition::new("context", "Context", SensitivityLevel::Write)
            .with_action(ActionVariant::new("list", "List", ObjectSchema::new()))
            .with_action(ActionVariant::new("add", "Add", ObjectSchema::new()));

        assert!(tool.is_unified());
        assert_eq!(tool.schema.action_names(), vec!["list", "add"]);
    }

    #[test]
    fn test_tool_spec_sensitivity() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("search_library", "Search", SensitivityLevel::Read))
            .register(ToolDefinition::new("delete_item", "Delete", SensitivityLevel::Destructive));

        assert_eq!(spec.sensitivity("search_library"), SensitivityLevel::Read);
        assert_eq!(spec.sensitivity("delete_item"), SensitivityLevel::Destructive);
        assert_eq!(spec.sensitivity("never_registered"), SensitivityLevel::Destructive);
        assert_eq!(spec.tools_at(SensitivityLevel::Read).count(), 1);
    }

    #[test]
    fn test_tool_spec_aliases() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("note", "Notes", SensitivityLevel::Write))
            .register_aliases([("notes", "note"), ("annotate", "note")]);

        assert_eq!(spec.resolve_alias("notes"), Some("note"));
        assert_eq!(spec.resolve_alias("note"), None);
        assert_eq!(spec.resolve("note"), Some("note"));
        assert_eq!(spec.resolve("annotate"), Some("note"));
        assert_eq!(spec.resolve("unknown"), None);
        assert_eq!(spec.get_resolved("notes").unwrap().name, "note");
        assert!(spec.get("notes").is_none());
    }

    #[test]
    fn test_canonical_name_takes_priority_over_alias() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("web", "Web", SensitivityLevel::Read))
            .register(ToolDefinition::new("fetch", "Fetch", SensitivityLevel::Read))
            .register_alias("fetch", "web");

        assert_eq!(spec.resolve("fetch"), Some("fetch"));
    }

    #[test]
    fn test_current_and_deprecated_split() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("collection", "Collections", SensitivityLevel::Write))
            .register(
                ToolDefinition::new("add_to_collection", "Add", SensitivityLevel::Write)
                    .deprecated_for("collection(action=add_item)"),
            );

        assert_eq!(spec.current_tools().count(), 1);
        assert_eq!(spec.deprecated_tools().next().unwrap().name, "add_to_collection");
    }

    #[test]
    fn test_tool_call_with_json() {
        let call = ToolCall::with_json("call_1", "get_item", &serde_json::json!({"item_id": "I1"}));
        assert_eq!(call.arguments, r#"{"item_id":"I1"}"#);
    }
}
