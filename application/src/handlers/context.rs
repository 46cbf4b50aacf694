//! `context` unified tool.

use super::batch::BatchOutcome;
use super::{backend_failure, item_summary, plural};
use crate::ports::conversation_context::ConversationContextPort;
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContextAction {
    Add { item_ids: Vec<String> },
    Remove { item_ids: Vec<String> },
    List,
}

pub struct ContextHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
    context: Arc<dyn ConversationContextPort>,
}

impl ContextHandler {
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBasePort>,
        context: Arc<dyn ConversationContextPort>,
    ) -> Self {
        Self {
            knowledge_base,
            context,
        }
    }

    async fn add(&self, ctx: &HandlerContext, item_ids: &[String]) -> ToolResult {
        let mut batch = BatchOutcome::new("added", item_ids.len());
        for item_id in item_ids {
            let outcome = self.add_one(ctx, item_id).await;
            batch.record(item_id, outcome);
        }
        batch.into_result("to context")
    }

    async fn add_one(&self, ctx: &HandlerContext, item_id: &str) -> Result<(), String> {
        let item = self
            .knowledge_base
            .get_item(item_id)
            .await
            .map_err(|e| e.to_string())?;
        if let Some(scope) = &ctx.config.scope
            && &item.library_id != scope
        {
            return Err(format!(
                "item '{}' is outside the session library {}",
                item_id, scope
            ));
        }
        let newly_added = self.context.add(item_id).await.map_err(|e| e.to_string())?;
        if !newly_added {
            debug!("{} already in context", item_id);
        }
        Ok(())
    }

    async fn remove(&self, item_ids: &[String]) -> ToolResult {
        let mut batch = BatchOutcome::new("removed", item_ids.len());
        for item_id in item_ids {
            let outcome = match self.context.remove(item_id).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(format!("item '{}' is not in context", item_id)),
                Err(e) => Err(e.to_string()),
            };
            batch.record(item_id, outcome);
        }
        batch.into_result("from context")
    }

    async fn list(&self) -> ToolResult {
        let ids = match self.context.list().await {
            Ok(ids) => ids,
            Err(e) => return backend_failure(e),
        };

        let mut items = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.knowledge_base.get_item(id).await {
                Ok(item) => items.push(item_summary(&item)),
                Err(_) => items.push(json!({ "id": id, "missing": true })),
            }
        }
        let summary = format!("{} in context", plural(ids.len(), "item"));
        ToolResult::success(json!({ "items": items })).with_summary(summary)
    }
}

#[async_trait]
impl ToolHandler for ContextHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let action = match decode_args::<ContextAction>("context", &args) {
            Ok(action) => action,
            Err(result) => return result,
        };

        match action {
            ContextAction::Add { item_ids } => self.add(ctx, &item_ids).await,
            ContextAction::Remove { item_ids } => self.remove(&item_ids).await,
            ContextAction::List => self.list().await,
        }
    }
}
