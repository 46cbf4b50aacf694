//! `search_library` and `get_item`.

use super::{backend_failure, item_summary, plural, to_json};
use crate::ports::knowledge_base::{ItemQuery, KnowledgeBasePort};
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::ItemType;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    item_type: Option<ItemType>,
    #[serde(default)]
    tag: Option<String>,
}

fn default_limit() -> usize {
    10
}

pub struct SearchLibraryHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl SearchLibraryHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl ToolHandler for SearchLibraryHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let args: SearchArgs = match decode_args("search_library", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };

        let query = ItemQuery::new(&args.query, args.limit)
            .with_library(ctx.config.scope.clone())
            .with_item_type(args.item_type)
            .with_tag(args.tag);

        match self.knowledge_base.search_items(&query).await {
            Ok(items) => {
                let summary = format!("found {} for '{}'", plural(items.len(), "item"), args.query);
                let items: Vec<_> = items.iter().map(item_summary).collect();
                ToolResult::success(json!({ "items": items })).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetItemArgs {
    item_id: String,
}

pub struct GetItemHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
}

impl GetItemHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl ToolHandler for GetItemHandler {
    async fn handle(&self, args: ValidatedArguments, _ctx: &HandlerContext) -> ToolResult {
        let args: GetItemArgs = match decode_args("get_item", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };

        match self.knowledge_base.get_item(&args.item_id).await {
            Ok(item) => {
                let summary = item.citation_label();
                ToolResult::success(to_json(&item)).with_summary(summary)
            }
            Err(e) => backend_failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use crate::handlers::testing::{FakeKnowledgeBase, checked, ctx, ctx_with};

    #[tokio::test]
    async fn test_search_is_scoped() {
        let kb = FakeKnowledgeBase::seeded();
        let handler = SearchLibraryHandler::new(kb);

        let result = handler
            .handle(checked(json!({"query": "a", "limit": 10})), &ctx())
            .await;
        assert_eq!(result.data().unwrap()["items"].as_array().unwrap().len(), 3);

        let scoped = handler
            .handle(
                checked(json!({"query": "a", "limit": 10})),
                &ctx_with(AgentConfig::default().with_scope("L2")),
            )
            .await;
        assert_eq!(scoped.data().unwrap()["items"].as_array().unwrap().len(), 1);
        assert_eq!(scoped.summary(), Some("found 1 item for 'a'"));
    }

    #[tokio::test]
    async fn test_get_item_missing() {
        let kb = FakeKnowledgeBase::seeded();
        let result = GetItemHandler::new(kb)
            .handle(checked(json!({"item_id": "I9"})), &ctx())
            .await;
        assert_eq!(result.error().unwrap().message, "item 'I9' not found");
    }

    #[tokio::test]
    async fn test_get_item() {
        let kb = FakeKnowledgeBase::seeded();
        let result = GetItemHandler::new(kb)
            .handle(checked(json!({"item_id": "I1"})), &ctx())
            .await;
        assert_eq!(result.data().unwrap()["title"], "Notes on the Analytical Engine");
        assert_eq!(
            result.summary(),
            Some("Lovelace (1843) Notes on the Analytical Engine")
        );
    }
}
