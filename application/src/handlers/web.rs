//! `web` unified tool.

use super::{backend_failure, plural, to_json};
use crate::ports::web::WebPort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::core::string::clip_chars;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebAction {
    Search {
        query: String,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    Fetch {
        url: String,
    },
}

fn default_limit() -> usize {
    5
}

pub struct WebHandler {
    web: Arc<dyn WebPort>,
}

impl WebHandler {
    pub fn new(web: Arc<dyn WebPort>) -> Self {
        Self { web }
    }
}

#[async_trait]
impl ToolHandler for WebHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let action = match decode_args::<WebAction>("web", &args) {
            Ok(action) => action,
            Err(result) => return result,
        };

        match action {
            WebAction::Search { query, limit } => match self.web.search(&query, limit).await {
                Ok(hits) => {
                    let summary = format!("{} for '{}'", plural(hits.len(), "web result"), query);
                    ToolResult::success(json!({ "results": to_json(&hits) })).with_summary(summary)
                }
                Err(e) => backend_failure(e),
            },
            WebAction::Fetch { url } => match self.web.fetch(&url).await {
                Ok(page) => {
                    let total = page.text.chars().count();
                    let (text, truncated) = clip_chars(&page.text, ctx.config.max_content_chars);
                    let summary = if truncated {
                        format!(
                            "fetched {} (truncated to {} of {} characters)",
                            page.url, ctx.config.max_content_chars, total
                        )
                    } else {
                        format!("fetched {} ({} characters)", page.url, total)
                    };
                    ToolResult::success(json!({
                        "url": page.url,
                        "title": page.title,
                        "text": text,
                        "truncated": truncated,
                    }))
                    .with_summary(summary)
                }
                Err(e) => backend_failure(e),
            },
        }
    }
}
