//! `collection` unified tool.

use super::batch::BatchOutcome;
use super::{backend_failure, collection_summary, plural};
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use scholar_domain::{Collection, Membership};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionAction {
    Find {
        name: String,
    },
    Create {
        name: String,
        #[serde(default)]
        parent_collection_id: Option<String>,
    },
    List {
        #[serde(default)]
        parent_collection_id: Option<String>,
    },
    AddItem {
        collection_id: String,
        item_ids: Vec<String>,
    },
    RemoveItem {
        collection_id: String,
        item_ids: Vec<String>,
    },
}

pub struct CollectionHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl CollectionHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }

    async fn find(&self, ctx: &HandlerContext, name: &str) -> ToolResult {
        match self
            .knowledge_base
            .find_collections(ctx.config.scope.as_deref(), name)
            .await
        {
            Ok(found) => {
                let summary = format!("found {} matching '{}'", plural(found.len(), "collection"), name);
                ToolResult::success(json!({ "collections": listing(&found) })).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }

    async fn create(&self, ctx: &HandlerContext, name: &str, parent: Option<&str>) -> ToolResult {
        // A child lives in its parent's library, whatever the session scope.
        let library = match parent {
            Some(parent_id) => match self.knowledge_base.get_collection(parent_id).await {
                Ok(parent) => Some(parent.library_id),
                Err(e) => return backend_failure(e),
            },
            None => ctx.config.scope.clone(),
        };

        match self
            .knowledge_base
            .create_collection(library.as_deref(), name, parent)
            .await
        {
            Ok(collection) => {
                let summary = format!("created collection '{}' ({})", collection.name, collection.id);
                ToolResult::success(collection_summary(&collection)).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }

    async fn list(&self, ctx: &HandlerContext, parent: Option<&str>) -> ToolResult {
        match self
            .knowledge_base
            .list_collections(ctx.config.scope.as_deref(), parent)
            .await
        {
            Ok(found) => {
                let summary = format!("listed {}", plural(found.len(), "collection"));
                ToolResult::success(json!({ "collections": listing(&found) })).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }

    async fn add_items(&self, collection_id: &str, item_ids: &[String]) -> ToolResult {
        let collection = match self.knowledge_base.get_collection(collection_id).await {
            Ok(c) => c,
            Err(e) => return backend_failure(e),
        };

        let mut batch = BatchOutcome::new("added", item_ids.len());
        for item_id in item_ids {
            let outcome = self.add_one(&collection, item_id).await;
            batch.record(item_id, outcome);
        }
        debug!(
            "add_item into {}: {} of {} succeeded",
            collection.id,
            batch.succeeded(),
            item_ids.len()
        );
        batch.into_result(&format!("to collection '{}'", collection.name))
    }

    async fn add_one(&self, collection: &Collection, item_id: &str) -> Result<(), String> {
        let item = self
            .knowledge_base
            .get_item(item_id)
            .await
            .map_err(|e| e.to_string())?;
        if item.library_id != collection.library_id {
            return Err(format!(
                "item '{}' is in library {}, collection '{}' is in library {}",
                item.id, item.library_id, collection.id, collection.library_id
            ));
        }
        match self
            .knowledge_base
            .add_to_collection(&collection.id, item_id)
            .await
        {
            Ok(Membership::Added) | Ok(Membership::AlreadyPresent) => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    async fn remove_items(&self, collection_id: &str, item_ids: &[String]) -> ToolResult {
        let collection = match self.knowledge_base.get_collection(collection_id).await {
            Ok(c) => c,
            Err(e) => return backend_failure(e),
        };

        let mut batch = BatchOutcome::new("removed", item_ids.len());
        for item_id in item_ids {
            let outcome = self
                .knowledge_base
                .remove_from_collection(&collection.id, item_id)
                .await
                .map_err(|e| e.to_string());
            batch.record(item_id, outcome);
        }
        batch.into_result(&format!("from collection '{}'", collection.name))
    }
}

fn listing(collections: &[Collection]) -> Vec<Value> {
    collections.iter().map(collection_summary).collect()
}

#[async_trait]
impl ToolHandler for CollectionHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let action = match decode_args::<CollectionAction>("collection", &args) {
            Ok(action) => action,
            Err(result) => return result,
        };

        match action {
            CollectionAction::Find { name } => self.find(ctx, &name).await,
            CollectionAction::Create {
                name,
                parent_collection_id,
            } => self.create(ctx, &name, parent_collection_id.as_deref()).await,
            CollectionAction::List {
                parent_collection_id,
            } => self.list(ctx, parent_collection_id.as_deref()).await,
            CollectionAction::AddItem {
                collection_id,
                item_ids,
            } => self.add_items(&collection_id, &item_ids).await,
            CollectionAction::RemoveItem {
                collection_id,
                item_ids,
            } => self.remove_items(&collection_id, &item_ids).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use crate::handlers::testing::{FakeKnowledgeBase, checked, ctx, ctx_with};
    use scholar_domain::tool::ToolErrorKind;

    fn handler(kb: &Arc<FakeKnowledgeBase>) -> CollectionHandler {
        CollectionHandler::new(kb.clone())
    }

    #[tokio::test]
    async fn test_add_item_is_idempotent() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = handler(&kb);
        let args = json!({"action": "add_item", "collection_id": "C1", "item_ids": ["I1"]});

        let first = handler.handle(checked(args.clone()), &ctx()).await;
        let second = handler.handle(checked(args), &ctx()).await;

        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(kb.members("C1").len(), 1);
    }

    #[tokio::test]
    async fn test_add_item_partial_failure() {
        let kb = FakeKnowledgeBase::seeded();
        let result = handler(&kb)
            .handle(
                checked(json!({
                    "action": "add_item",
                    "collection_id": "C1",
                    "item_ids": ["I1", "I9", "I3", "I2"],
                })),
                &ctx(),
            )
            .await;

        assert!(result.is_success());
        let data = result.data().unwrap();
        assert_eq!(data["added"], 2);
        assert_eq!(data["total"], 4);
        assert_eq!(data["failed"].as_array().unwrap().len(), 2);
        assert_eq!(data["failed"][0]["error"], "item 'I9' not found");
        assert_eq!(result.summary(), Some("added 2 of 4 items to collection 'Engines'"));
        assert_eq!(kb.members("C1").len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_unknown_collection_fails_atomically() {
        let kb = FakeKnowledgeBase::seeded();
        let result = handler(&kb)
            .handle(
                checked(json!({"action": "add_item", "collection_id": "C9", "item_ids": ["I1"]})),
                &ctx(),
            )
            .await;
        assert_eq!(result.error().unwrap().message, "collection 'C9' not found");
        assert_eq!(result.error_kind(), Some(ToolErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_remove_item() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = handler(&kb);
        handler
            .handle(
                checked(json!({"action": "add_item", "collection_id": "C1", "item_ids": ["I1", "I2"]})),
                &ctx(),
            )
            .await;
        let result = handler
            .handle(
                checked(json!({"action": "remove_item", "collection_id": "C1", "item_ids": ["I2", "I3"]})),
                &ctx(),
            )
            .await;
        assert_eq!(result.data().unwrap()["removed"], 1);
        assert_eq!(kb.members("C1").into_iter().collect::<Vec<_>>(), vec!["I1"]);
    }

    #[tokio::test]
    async fn test_find_respects_scope() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = handler(&kb);
        let args = json!({"action": "find", "name": "I"});

        let all = handler.handle(checked(args.clone()), &ctx()).await;
        assert_eq!(all.data().unwrap()["collections"].as_array().unwrap().len(), 3);

        let scoped = handler
            .handle(checked(args), &ctx_with(AgentConfig::default().with_scope("L2")))
            .await;
        let collections = scoped.data().unwrap()["collections"].as_array().unwrap().clone();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0]["id"], "C3");
    }

    #[tokio::test]
    async fn test_create_uses_parent_library() {
        let kb = FakeKnowledgeBase::seeded();
        let result = handler(&kb)
            .handle(
                checked(json!({"action": "create", "name": "Sub", "parent_collection_id": "C3"})),
                &ctx(),
            )
            .await;
        let data = result.data().unwrap();
        assert_eq!(data["library_id"], "L2");
        assert_eq!(data["parent_id"], "C3");
    }

    #[tokio::test]
    async fn test_out_of_range_action_fails() {
        let kb = FakeKnowledgeBase::seeded();
        let result = handler(&kb)
            .handle(checked(json!({"action": "purge"})), &ctx())
            .await;
        assert!(!result.is_success());
    }
}
