//! Single-entity item and collection mutations: `move_item`,
//! `delete_item`, `delete_collection`. These fail atomically.

use super::{backend_failure, plural};
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::tool::{ToolError, ToolResult, ValidatedArguments};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct MoveArgs {
    item_id: String,
    target_collection_id: String,
    #[serde(default)]
    source_collection_id: Option<String>,
}

pub struct MoveItemHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl MoveItemHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }

    async fn run(&self, args: MoveArgs) -> Result<ToolResult, ToolError> {
        let item = self.knowledge_base.get_item(&args.item_id).await?;
        let target = self
            .knowledge_base
            .get_collection(&args.target_collection_id)
            .await?;
        if item.library_id != target.library_id {
            return Err(ToolError::handler(format!(
                "cannot move item across libraries ({} → {})",
                item.library_id, target.library_id
            )));
        }
        if let Some(source_id) = &args.source_collection_id {
            let source = self.knowledge_base.get_collection(source_id).await?;
            if !source.item_ids.contains(&item.id) {
                return Err(ToolError::handler(format!(
                    "item '{}' is not in collection '{}'",
                    item.id, source.id
                )));
            }
        }

        self.knowledge_base
            .move_item(&item.id, &target.id, args.source_collection_id.as_deref())
            .await?;

        let summary = match &args.source_collection_id {
            Some(source) => format!("moved {} from {} to '{}'", item.id, source, target.name),
            None => format!("moved {} to '{}'", item.id, target.name),
        };
        Ok(ToolResult::success(json!({
            "item_id": item.id,
            "target_collection_id": target.id,
            "source_collection_id": args.source_collection_id,
        }))
        .with_summary(summary))
    }
}

#[async_trait]
impl ToolHandler for MoveItemHandler {
    async fn handle(&self, args: ValidatedArguments, _ctx: &HandlerContext) -> ToolResult {
        let args: MoveArgs = match decode_args("move_item", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };
        self.run(args).await.unwrap_or_else(ToolResult::failure)
    }
}

#[derive(Debug, Deserialize)]
struct DeleteItemArgs {
    item_id: String,
}

pub struct DeleteItemHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl DeleteItemHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl ToolHandler for DeleteItemHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let args: DeleteItemArgs = match decode_args("delete_item", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };

        let item = match self.knowledge_base.get_item(&args.item_id).await {
            Ok(item) => item,
            Err(e) => return backend_failure(e),
        };
        match self.knowledge_base.delete_item(&item.id).await {
            Ok(()) => {
                info!("Deleted item {} ({})", item.id, ctx.call_id);
                ToolResult::success(json!({ "deleted": item.id }))
                    .with_summary(format!("deleted '{}'", item.title))
            }
            Err(e) => backend_failure(e),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteCollectionArgs {
    collection_id: String,
    #[serde(default)]
    delete_items: bool,
}

pub struct DeleteCollectionHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl DeleteCollectionHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl ToolHandler for DeleteCollectionHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let args: DeleteCollectionArgs = match decode_args("delete_collection", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };

        let collection = match self.knowledge_base.get_collection(&args.collection_id).await {
            Ok(c) => c,
            Err(e) => return backend_failure(e),
        };
        match self
            .knowledge_base
            .delete_collection(&collection.id, args.delete_items)
            .await
        {
            Ok(deleted_items) => {
                info!(
                    "Deleted collection {} with {} items ({})",
                    collection.id, deleted_items, ctx.call_id
                );
                let summary = if args.delete_items {
                    format!(
                        "deleted collection '{}' and {}",
                        collection.name,
                        plural(deleted_items, "item")
                    )
                } else {
                    format!("deleted collection '{}'", collection.name)
                };
                ToolResult::success(json!({
                    "deleted": collection.id,
                    "deleted_items": deleted_items,
                }))
                .with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{FakeKnowledgeBase, checked, ctx};

    #[tokio::test]
    async fn test_move_across_libraries_fails() {
        let kb = FakeKnowledgeBase::seeded();
        let result = MoveItemHandler::new(kb.clone())
            .handle(
                checked(json!({"item_id": "I1", "target_collection_id": "C3"})),
                &ctx(),
            )
            .await;
        assert_eq!(
            result.error().unwrap().message,
            "cannot move item across libraries (L1 → L2)"
        );
        assert!(kb.members("C3").is_empty());
    }

    #[tokio::test]
    async fn test_move_between_collections() {
        let kb = FakeKnowledgeBase::seeded();
        kb.state
            .lock()
            .unwrap()
            .collections
            .get_mut("C1")
            .unwrap()
            .item_ids
            .insert("I1".to_string());

        let result = MoveItemHandler::new(kb.clone())
            .handle(
                checked(json!({"item_id": "I1", "target_collection_id": "C2", "source_collection_id": "C1"})),
                &ctx(),
            )
            .await;
        assert!(result.is_success());
        assert!(kb.members("C1").is_empty());
        assert!(kb.members("C2").contains("I1"));
    }

    #[tokio::test]
    async fn test_move_from_wrong_source_fails() {
        let kb = FakeKnowledgeBase::seeded();
        let result = MoveItemHandler::new(kb)
            .handle(
                checked(json!({"item_id": "I1", "target_collection_id": "C2", "source_collection_id": "C1"})),
                &ctx(),
            )
            .await;
        assert_eq!(
            result.error().unwrap().message,
            "item 'I1' is not in collection 'C1'"
        );
    }

    #[tokio::test]
    async fn test_delete_collection_with_items() {
        let kb = FakeKnowledgeBase::seeded();
        kb.state
            .lock()
            .unwrap()
            .collections
            .get_mut("C1")
            .unwrap()
            .item_ids
            .extend(["I1".to_string(), "I2".to_string()]);

        let result = DeleteCollectionHandler::new(kb.clone())
            .handle(
                checked(json!({"collection_id": "C1", "delete_items": true})),
                &ctx(),
            )
            .await;
        assert_eq!(result.data().unwrap()["deleted_items"], 2);
        assert_eq!(result.summary(), Some("deleted collection 'Engines' and 2 items"));
        assert!(kb.state.lock().unwrap().items.get("I1").is_none());
    }

    #[tokio::test]
    async fn test_delete_item() {
        let kb = FakeKnowledgeBase::seeded();
        let result = DeleteItemHandler::new(kb.clone())
            .handle(checked(json!({"item_id": "I2"})), &ctx())
            .await;
        assert!(result.is_success());
        assert!(!kb.state.lock().unwrap().items.contains_key("I2"));
    }
}
