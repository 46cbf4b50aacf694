//! Tool handlers.
//!
//! One module per tool surface. Unified tools decode their validated
//! arguments into a `#[serde(tag = "action")]` enum and `match` on it, so
//! each action has exactly one code path. Deprecated single-verb tools are
//! served by [`legacy::LegacyActionHandler`], which injects the action and
//! delegates to the unified handler.

pub mod academic;
pub mod batch;
pub mod collection;
pub mod context;
pub mod items;
pub mod legacy;
pub mod library;
pub mod note;
pub mod pdf;
pub mod web;

use crate::ports::backend::BackendError;
use scholar_domain::tool::{ToolError, ToolResult};
use scholar_domain::{Collection, LibraryItem};
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) fn backend_failure(err: BackendError) -> ToolResult {
    ToolResult::failure(ToolError::from(err))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Compact item view used in listings
pub(crate) fn item_summary(item: &LibraryItem) -> Value {
    json!({
        "id": item.id,
        "title": item.title,
        "item_type": item.item_type,
        "authors": item.authors,
        "year": item.year,
        "library_id": item.library_id,
    })
}

pub(crate) fn collection_summary(collection: &Collection) -> Value {
    json!({
        "id": collection.id,
        "name": collection.name,
        "library_id": collection.library_id,
        "parent_id": collection.parent_id,
        "item_count": collection.item_ids.len(),
    })
}

pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
