//! Deprecated single-verb tools.

use crate::tools::dispatch::{HandlerContext, ToolHandler};
use async_trait::async_trait;
use scholar_domain::ACTION_FIELD;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use std::sync::Arc;
use tracing::debug;

/// Serves a legacy tool by injecting its fixed action and delegating to
/// the unified handler, so both names share one code path.
pub struct LegacyActionHandler {
    action: &'static str,
    target: Arc<dyn ToolHandler>,
}

impl LegacyActionHandler {
    pub fn new(action: &'static str, target: Arc<dyn ToolHandler>) -> Self {
        Self { action, target }
    }
}

#[async_trait]
impl ToolHandler for LegacyActionHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        debug!("Legacy call {} routed to action '{}'", ctx.call_id, self.action);
        let args = args.with_field(ACTION_FIELD, self.action);
        self.target.handle(args, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::collection::CollectionHandler;
    use crate::handlers::testing::{FakeKnowledgeBase, checked, ctx};
    use serde_json::json;

    #[tokio::test]
    async fn test_legacy_matches_unified() {
        let kb = FakeKnowledgeBase::seeded();
        let unified: Arc<dyn ToolHandler> = Arc::new(CollectionHandler::new(kb));
        let legacy = LegacyActionHandler::new("find", unified.clone());

        let via_legacy = legacy.handle(checked(json!({"name": "eng"})), &ctx()).await;
        let via_unified = unified
            .handle(checked(json!({"action": "find", "name": "eng"})), &ctx())
            .await;
        assert_eq!(
            serde_json::to_value(&via_legacy).unwrap(),
            serde_json::to_value(&via_unified).unwrap()
        );
    }
}
