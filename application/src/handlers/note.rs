//! `note` unified tool.

use super::{backend_failure, to_json};
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use scholar_domain::{NoteDraft, NoteEditMode};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NoteAction {
    Create {
        content: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        parent_item_id: Option<String>,
        #[serde(default)]
        collection_id: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    },
    Read {
        note_id: String,
    },
    Edit {
        note_id: String,
        content: String,
        #[serde(default)]
        mode: NoteEditMode,
    },
}

pub struct NoteHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl NoteHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }

    async fn create(&self, draft: NoteDraft) -> ToolResult {
        if let Some(item_id) = &draft.parent_item_id
            && let Err(e) = self.knowledge_base.get_item(item_id).await
        {
            return backend_failure(e);
        }
        if let Some(collection_id) = &draft.collection_id
            && let Err(e) = self.knowledge_base.get_collection(collection_id).await
        {
            return backend_failure(e);
        }

        match self.knowledge_base.create_note(draft).await {
            Ok(note) => {
                let target = match (&note.parent_item_id, &note.collection_id) {
                    (Some(item), _) => format!("on item {}", item),
                    (None, Some(collection)) => format!("in collection {}", collection),
                    (None, None) => "unattached".to_string(),
                };
                let summary = format!("created note {} {}", note.id, target);
                ToolResult::success(to_json(&note)).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }

    async fn read(&self, note_id: &str) -> ToolResult {
        match self.knowledge_base.get_note(note_id).await {
            Ok(note) => ToolResult::success(to_json(&note)),
            Err(e) => backend_failure(e),
        }
    }

    async fn edit(&self, note_id: &str, content: &str, mode: NoteEditMode) -> ToolResult {
        let existing = match self.knowledge_base.get_note(note_id).await {
            Ok(note) => note,
            Err(e) => return backend_failure(e),
        };
        let updated = mode.apply(&existing.content, content);

        match self.knowledge_base.update_note(note_id, &updated).await {
            Ok(note) => {
                let verb = match mode {
                    NoteEditMode::Replace => "replaced content of",
                    NoteEditMode::Append => "appended to",
                    NoteEditMode::Prepend => "prepended to",
                };
                ToolResult::success(to_json(&note)).with_summary(format!("{} note {}", verb, note.id))
            }
            Err(e) => backend_failure(e),
        }
    }
}

#[async_trait]
impl ToolHandler for NoteHandler {
    async fn handle(&self, args: ValidatedArguments, _ctx: &HandlerContext) -> ToolResult {
        let action = match decode_args::<NoteAction>("note", &args) {
            Ok(action) => action,
            Err(result) => return result,
        };

        match action {
            NoteAction::Create {
                content,
                title,
                parent_item_id,
                collection_id,
                tags,
            } => {
                self.create(NoteDraft {
                    content,
                    title,
                    parent_item_id,
                    collection_id,
                    tags,
                })
                .await
            }
            NoteAction::Read { note_id } => self.read(&note_id).await,
            NoteAction::Edit {
                note_id,
                content,
                mode,
            } => self.edit(&note_id, &content, mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{FakeKnowledgeBase, checked, ctx};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_on_item() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = NoteHandler::new(kb.clone());
        let result = handler
            .handle(
                checked(json!({"action": "create", "content": "Key idea", "parent_item_id": "I1", "tags": ["todo"]})),
                &ctx(),
            )
            .await;
        assert!(result.is_success());
        assert_eq!(result.data().unwrap()["tags"][0], "todo");
        assert!(result.summary().unwrap().ends_with("on item I1"));
    }

    #[tokio::test]
    async fn test_create_on_missing_item_fails() {
        let kb = FakeKnowledgeBase::seeded();
        let result = NoteHandler::new(kb)
            .handle(
                checked(json!({"action": "create", "content": "x", "parent_item_id": "I9"})),
                &ctx(),
            )
            .await;
        assert_eq!(result.error().unwrap().message, "item 'I9' not found");
    }

    #[tokio::test]
    async fn test_edit_append() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = NoteHandler::new(kb.clone());
        let result = handler
            .handle(
                checked(json!({"action": "edit", "note_id": "N1", "content": "second", "mode": "append"})),
                &ctx(),
            )
            .await;
        assert_eq!(result.data().unwrap()["content"], "first\n\nsecond");
        assert_eq!(result.summary(), Some("appended to note N1"));
    }

    #[tokio::test]
    async fn test_read() {
        let kb = FakeKnowledgeBase::seeded();
        let result = NoteHandler::new(kb)
            .handle(checked(json!({"action": "read", "note_id": "N1"})), &ctx())
            .await;
        assert_eq!(result.data().unwrap()["content"], "first");
    }
}
