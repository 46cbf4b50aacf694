//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for the native tool-use API.
//!
//! | Domain | JSON Schema |
//! |--------|-------------|
//! | `ParamKind::String` | `string` + `minLength` / `maxLength` |
//! | `ParamKind::Url` | `string`, `format: uri`, `^https?://` pattern |
//! | `ParamKind::Integer` | `integer` + `minimum` / `maximum` |
//! | `ParamKind::Enum` | `string` + `enum` |
//! | `ParamKind::Array` | `array` + `items` / `minItems` / `maxItems` |
//! | `ParameterSchema::Actions` | `action` enum + one `oneOf` branch per action |
//! | `ParameterSchema::Open` | bare `object` |
//!
//! Cross-field refinements have no portable JSON Schema form; their
//! [`describe`](scholar_domain::tool::Refinement::describe) text is appended
//! to the description instead.

use scholar_application::ports::tool_schema::ToolSchemaPort;
use scholar_domain::tool::{
    ACTION_FIELD, ObjectSchema, ParamKind, ParameterSchema, SensitivityLevel, ToolDefinition,
    ToolParameter, ToolSpec,
};
use serde_json::{Map, Value, json};

pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn kind_schema(kind: &ParamKind) -> Map<String, Value> {
        let mut schema = Map::new();
        match kind {
            ParamKind::String {
                min_length,
                max_length,
            } => {
                schema.insert("type".into(), json!("string"));
                if let Some(min) = min_length {
                    schema.insert("minLength".into(), json!(min));
                }
                if let Some(max) = max_length {
                    schema.insert("maxLength".into(), json!(max));
                }
            }
            ParamKind::Url => {
                schema.insert("type".into(), json!("string"));
                schema.insert("format".into(), json!("uri"));
                schema.insert("pattern".into(), json!("^https?://"));
            }
            ParamKind::Integer { min, max } => {
                schema.insert("type".into(), json!("integer"));
                if let Some(min) = min {
                    schema.insert("minimum".into(), json!(min));
                }
                if let Some(max) = max {
                    schema.insert("maximum".into(), json!(max));
                }
            }
            ParamKind::Boolean => {
                schema.insert("type".into(), json!("boolean"));
            }
            ParamKind::Enum { values } => {
                schema.insert("type".into(), json!("string"));
                schema.insert("enum".into(), json!(values));
            }
            ParamKind::Array {
                items,
                min_items,
                max_items,
            } => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), Value::Object(Self::kind_schema(items)));
                if let Some(min) = min_items {
                    schema.insert("minItems".into(), json!(min));
                }
                if let Some(max) = max_items {
                    schema.insert("maxItems".into(), json!(max));
                }
            }
        }
        schema
    }

    fn parameter_schema(param: &ToolParameter) -> Value {
        let mut schema = Self::kind_schema(&param.kind);
        schema.insert("description".into(), json!(param.description));
        if let Some(default) = &param.default {
            schema.insert("default".into(), default.clone());
        }
        Value::Object(schema)
    }

    /// `properties` and `required` of a flat object schema
    fn object_parts(object: &ObjectSchema) -> (Map<String, Value>, Vec<Value>) {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &object.parameters {
            properties.insert(param.name.clone(), Self::parameter_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }
        (properties, required)
    }

    fn refinement_notes(object: &ObjectSchema) -> Option<String> {
        if object.refinements.is_empty() {
            return None;
        }
        Some(
            object
                .refinements
                .iter()
                .map(|r| r.describe())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    fn input_schema(schema: &ParameterSchema) -> Value {
        match schema {
            ParameterSchema::Object(object) => {
                let (properties, required) = Self::object_parts(object);
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                })
            }
            ParameterSchema::Actions { variants } => {
                let actions: Vec<&str> = variants.iter().map(|v| v.action.as_str()).collect();
                let branches: Vec<Value> = variants
                    .iter()
                    .map(|variant| {
                        let (mut properties, mut required) = Self::object_parts(&variant.schema);
                        properties.insert(ACTION_FIELD.into(), json!({ "const": variant.action }));
                        required.insert(0, json!(ACTION_FIELD));
                        let mut description = variant.description.clone();
                        if let Some(notes) = Self::refinement_notes(&variant.schema) {
                            description = format!("{} {}", description, notes);
                        }
                        json!({
                            "description": description,
                            "properties": properties,
                            "required": required,
                            "additionalProperties": false,
                        })
                    })
                    .collect();
                json!({
                    "type": "object",
                    "properties": {
                        ACTION_FIELD: {
                            "type": "string",
                            "enum": actions,
                            "description": "Operation to perform",
                        }
                    },
                    "required": [ACTION_FIELD],
                    "oneOf": branches,
                })
            }
            ParameterSchema::Open => json!({ "type": "object" }),
        }
    }

    fn render(&self, tools: Vec<&ToolDefinition>) -> Vec<Value> {
        let mut tools = tools;
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut description = tool.description.clone();
        if let ParameterSchema::Object(object) = &tool.schema
            && let Some(notes) = Self::refinement_notes(object)
        {
            description = format!("{} {}", description, notes);
        }

        json!({
            "name": tool.name,
            "description": description,
            "input_schema": Self::input_schema(&tool.schema),
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        self.render(spec.all().collect())
    }

    fn current_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        self.render(spec.current_tools().collect())
    }

    fn tools_at_schema(&self, spec: &ToolSpec, level: SensitivityLevel) -> Vec<Value> {
        self.render(spec.tools_at(level).collect())
    }
}
