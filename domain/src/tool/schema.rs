//! Parameter schemas: the declared argument shape of every tool.
//!
//! A single [`ParameterSchema`] drives both sides of the model contract:
//! the JSON Schema advertised in the tool catalog and the validation applied
//! to the arguments the model sends back. Keeping one description for both
//! prevents the corrective feedback from contradicting the advertised schema.
//!
//! ```text
//! ParameterSchema
//!   ├─ Object(ObjectSchema)        plain tools: search_library, get_item, ...
//!   ├─ Actions(Vec<ActionVariant>) unified tools keyed by `action`
//!   └─ Open                        no registered schema, passed through
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the discriminator field used by unified tools.
pub const ACTION_FIELD: &str = "action";

/// Type and constraints of a single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// An absolute `http://` or `https://` URL
    Url,
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    Boolean,
    Enum { values: Vec<String> },
    Array {
        items: Box<ParamKind>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<usize>,
    },
}

impl ParamKind {
    pub fn string() -> Self {
        ParamKind::String {
            min_length: None,
            max_length: None,
        }
    }

    pub fn non_empty_string() -> Self {
        ParamKind::String {
            min_length: Some(1),
            max_length: None,
        }
    }

    pub fn integer() -> Self {
        ParamKind::Integer {
            min: None,
            max: None,
        }
    }

    pub fn integer_range(min: i64, max: i64) -> Self {
        ParamKind::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn one_of<S: AsRef<str>>(values: &[S]) -> Self {
        ParamKind::Enum {
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        }
    }

    pub fn array_of(items: ParamKind, min_items: Option<usize>, max_items: Option<usize>) -> Self {
        ParamKind::Array {
            items: Box::new(items),
            min_items,
            max_items,
        }
    }

    /// JSON Schema type name for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamKind::String { .. } | ParamKind::Url | ParamKind::Enum { .. } => "string",
            ParamKind::Integer { .. } => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Array { .. } => "array",
        }
    }

    /// Check `value` against this kind, returning the normalized value.
    ///
    /// Violations are appended to `out`; the returned value is only
    /// meaningful when nothing was appended.
    pub fn check(&self, path: &str, value: &Value, out: &mut Vec<Violation>) -> Value {
        match self {
            ParamKind::String {
                min_length,
                max_length,
            } => {
                let Some(s) = value.as_str() else {
                    out.push(Violation::type_mismatch(path, "string", value));
                    return value.clone();
                };
                let len = s.chars().count();
                if let Some(min) = min_length
                    && len < *min
                {
                    let message = if *min == 1 {
                        "must not be empty".to_string()
                    } else {
                        format!("must contain at least {} characters", min)
                    };
                    out.push(Violation::new(path, message));
                }
                if let Some(max) = max_length
                    && len > *max
                {
                    out.push(Violation::new(
                        path,
                        format!("must contain at most {} characters", max),
                    ));
                }
                value.clone()
            }
            ParamKind::Url => {
                let Some(s) = value.as_str() else {
                    out.push(Violation::type_mismatch(path, "string", value));
                    return value.clone();
                };
                let trimmed = s.trim();
                let has_host = trimmed
                    .strip_prefix("https://")
                    .or_else(|| trimmed.strip_prefix("http://"))
                    .is_some_and(|rest| !rest.is_empty());
                if !has_host {
                    out.push(Violation::new(
                        path,
                        format!("must be an absolute http(s) URL, received '{}'", s),
                    ));
                }
                Value::String(trimmed.to_string())
            }
            ParamKind::Integer { min, max } => {
                let Some(n) = as_integer(value) else {
                    let expected = if value.is_number() {
                        "must be a whole number".to_string()
                    } else {
                        format!("expected integer, received {}", json_type(value))
                    };
                    out.push(Violation::new(path, expected));
                    return value.clone();
                };
                if let Some(min) = min
                    && n < *min
                {
                    out.push(Violation::new(
                        path,
                        format!("must be greater than or equal to {} (received {})", min, n),
                    ));
                }
                if let Some(max) = max
                    && n > *max
                {
                    out.push(Violation::new(
                        path,
                        format!("must be less than or equal to {} (received {})", max, n),
                    ));
                }
                Value::from(n)
            }
            ParamKind::Boolean => {
                if !value.is_boolean() {
                    out.push(Violation::type_mismatch(path, "boolean", value));
                }
                value.clone()
            }
            ParamKind::Enum { values } => {
                match value.as_str() {
                    Some(s) if values.iter().any(|v| v == s) => {}
                    Some(s) => out.push(Violation::new(
                        path,
                        format!(
                            "invalid value '{}', expected one of: {}",
                            s,
                            values.join(", ")
                        ),
                    )),
                    None => out.push(Violation::type_mismatch(path, "string", value)),
                }
                value.clone()
            }
            ParamKind::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(elements) = value.as_array() else {
                    out.push(Violation::type_mismatch(path, "array", value));
                    return value.clone();
                };
                if let Some(min) = min_items
                    && elements.len() < *min
                {
                    out.push(Violation::new(
                        path,
                        format!("must contain at least {} item(s)", min),
                    ));
                }
                if let Some(max) = max_items
                    && elements.len() > *max
                {
                    out.push(Violation::new(
                        path,
                        format!(
                            "must contain at most {} items (received {})",
                            max,
                            elements.len()
                        ),
                    ));
                }
                let normalized = elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| items.check(&format!("{}[{}]", path, i), element, out))
                    .collect();
                Value::Array(normalized)
            }
        }
    }
}

/// Accepts integral JSON numbers, including `3.0`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Specification of a single named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: ParamKind,
    /// Applied when an optional parameter is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            kind: ParamKind::string(),
            default: None,
        }
    }

    pub fn required(name: impl Into<String>, description: impl Into<String>, kind: ParamKind) -> Self {
        Self::new(name, description, true).with_kind(kind)
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>, kind: ParamKind) -> Self {
        Self::new(name, description, false).with_kind(kind)
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Cross-field rule evaluated after every field passes on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Refinement {
    /// At least one of the fields must be present
    AtLeastOneOf { fields: Vec<String> },
    /// When both integers are present, `earlier` must be <= `later`
    NotAfter { earlier: String, later: String },
}

impl Refinement {
    pub fn at_least_one_of<S: AsRef<str>>(fields: &[S]) -> Self {
        Refinement::AtLeastOneOf {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    pub fn not_after(earlier: impl Into<String>, later: impl Into<String>) -> Self {
        Refinement::NotAfter {
            earlier: earlier.into(),
            later: later.into(),
        }
    }

    /// Human-readable statement of the rule, used in catalog descriptions.
    pub fn describe(&self) -> String {
        match self {
            Refinement::AtLeastOneOf { fields } => {
                format!("At least one of {} is required.", fields.join(", "))
            }
            Refinement::NotAfter { earlier, later } => {
                format!("{} must not be greater than {}.", earlier, later)
            }
        }
    }

    fn check(&self, args: &Map<String, Value>, out: &mut Vec<Violation>) {
        match self {
            Refinement::AtLeastOneOf { fields } => {
                let present = fields
                    .iter()
                    .any(|f| args.get(f).is_some_and(|v| !v.is_null()));
                if !present && let Some(first) = fields.first() {
                    out.push(Violation::new(
                        first,
                        format!("at least one of {} is required", fields.join(", ")),
                    ));
                }
            }
            Refinement::NotAfter { earlier, later } => {
                let a = args.get(earlier).and_then(Value::as_i64);
                let b = args.get(later).and_then(Value::as_i64);
                if let (Some(a), Some(b)) = (a, b)
                    && a > b
                {
                    out.push(Violation::new(
                        earlier,
                        format!("must not be greater than {} ({} > {})", later, a, b),
                    ));
                }
            }
        }
    }
}

/// Flat object schema: named parameters plus cross-field refinements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    pub parameters: Vec<ToolParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refinements: Vec<Refinement>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_refinement(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Validate `input`, returning the normalized map with defaults applied.
    ///
    /// Keys listed in `reserved` are accepted without being declared (the
    /// `action` discriminator of unified tools) and are not copied.
    pub fn check(
        &self,
        input: &Map<String, Value>,
        reserved: &[&str],
    ) -> Result<Map<String, Value>, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut output = Map::new();

        for key in input.keys() {
            if reserved.contains(&key.as_str()) || self.parameter(key).is_some() {
                continue;
            }
            let expected: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
            let message = if expected.is_empty() {
                "unrecognized field (this call takes no other parameters)".to_string()
            } else {
                format!("unrecognized field (expected: {})", expected.join(", "))
            };
            violations.push(Violation::new(key, message));
        }

        for param in &self.parameters {
            match input.get(&param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        violations.push(Violation::new(&param.name, "required"));
                    } else if let Some(default) = &param.default {
                        output.insert(param.name.clone(), default.clone());
                    }
                }
                Some(value) => {
                    let normalized = param.kind.check(&param.name, value, &mut violations);
                    output.insert(param.name.clone(), normalized);
                }
            }
        }

        if violations.is_empty() {
            for refinement in &self.refinements {
                refinement.check(&output, &mut violations);
            }
        }

        if violations.is_empty() {
            Ok(output)
        } else {
            Err(violations)
        }
    }
}

/// One branch of a unified tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionVariant {
    pub action: String,
    pub description: String,
    pub schema: ObjectSchema,
}

impl ActionVariant {
    pub fn new(action: impl Into<String>, description: impl Into<String>, schema: ObjectSchema) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            schema,
        }
    }
}

/// Declared argument shape of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ParameterSchema {
    Object(ObjectSchema),
    /// Discriminated union keyed by the `action` field
    Actions { variants: Vec<ActionVariant> },
    /// No schema registered; arguments pass through unvalidated
    Open,
}

impl Default for ParameterSchema {
    fn default() -> Self {
        ParameterSchema::Object(ObjectSchema::default())
    }
}

impl ParameterSchema {
    pub fn actions(variants: Vec<ActionVariant>) -> Self {
        ParameterSchema::Actions { variants }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ParameterSchema::Open)
    }

    pub fn action_names(&self) -> Vec<&str> {
        match self {
            ParameterSchema::Actions { variants } => {
                variants.iter().map(|v| v.action.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn variant(&self, action: &str) -> Option<&ActionVariant> {
        match self {
            ParameterSchema::Actions { variants } => variants.iter().find(|v| v.action == action),
            _ => None,
        }
    }

    /// Validate arguments against a closed schema.
    ///
    /// Returns `Ok(None)` for [`ParameterSchema::Open`].
    pub fn check(&self, input: &Map<String, Value>) -> Result<Option<Map<String, Value>>, Vec<Violation>> {
        match self {
            ParameterSchema::Open => Ok(None),
            ParameterSchema::Object(schema) => schema.check(input, &[]).map(Some),
            ParameterSchema::Actions { variants } => {
                let names: Vec<&str> = variants.iter().map(|v| v.action.as_str()).collect();
                let action = match input.get(ACTION_FIELD) {
                    None | Some(Value::Null) => {
                        return Err(vec![Violation::new(
                            ACTION_FIELD,
                            format!("required (expected one of: {})", names.join(", ")),
                        )]);
                    }
                    Some(Value::String(s)) => s.as_str(),
                    Some(other) => {
                        return Err(vec![Violation::type_mismatch(ACTION_FIELD, "string", other)]);
                    }
                };
                let Some(variant) = variants.iter().find(|v| v.action == action) else {
                    return Err(vec![Violation::new(
                        ACTION_FIELD,
                        format!(
                            "invalid action '{}', expected one of: {}",
                            action,
                            names.join(", ")
                        ),
                    )]);
                };
                let mut output = variant.schema.check(input, &[ACTION_FIELD])?;
                output.insert(ACTION_FIELD.to_string(), Value::String(variant.action.clone()));
                Ok(Some(output))
            }
        }
    }
}

/// A single failed constraint, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field path, e.g. `limit` or `item_ids[2]`
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    fn type_mismatch(path: &str, expected: &str, value: &Value) -> Self {
        Self::new(
            path,
            format!("expected {}, received {}", expected, json_type(value)),
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
