//! Validated tool arguments.
//!
//! The validator never hands a handler raw model output. It produces a
//! [`ValidatedArguments`], which is either checked against a registered
//! schema (defaults applied, constraints satisfied) or explicitly marked as
//! unchecked because no schema exists for the tool.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedArguments {
    /// Passed every constraint of a registered schema
    Checked(Map<String, Value>),
    /// No schema is registered; forwarded as decoded
    Unchecked(Map<String, Value>),
}

impl ValidatedArguments {
    pub fn is_checked(&self) -> bool {
        matches!(self, ValidatedArguments::Checked(_))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        match self {
            ValidatedArguments::Checked(map) | ValidatedArguments::Unchecked(map) => map,
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        match self {
            ValidatedArguments::Checked(map) | ValidatedArguments::Unchecked(map) => map,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().get(key)
    }

    /// Set a field, keeping the checked/unchecked marker.
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        match self {
            ValidatedArguments::Checked(mut map) => {
                map.insert(key.into(), value.into());
                ValidatedArguments::Checked(map)
            }
            ValidatedArguments::Unchecked(mut map) => {
                map.insert(key.into(), value.into());
                ValidatedArguments::Unchecked(map)
            }
        }
    }

    /// Decode into a typed value (e.g. a tagged action enum).
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.as_map().clone()))
    }
}
