//! `academic` unified tool.

use super::{backend_failure, plural, to_json};
use crate::ports::scholar::{PaperQuery, ScholarPort};
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::CitationDirection;
use scholar_domain::tool::{ToolResult, ValidatedArguments};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AcademicAction {
    Search {
        query: String,
        #[serde(default = "default_search_limit")]
        limit: usize,
        #[serde(default)]
        year_from: Option<i32>,
        #[serde(default)]
        year_to: Option<i32>,
    },
    Paper {
        paper_id: String,
    },
    Citations {
        paper_id: String,
        #[serde(default)]
        direction: CitationDirection,
        #[serde(default = "default_citation_limit")]
        limit: usize,
    },
}

fn default_search_limit() -> usize {
    10
}

fn default_citation_limit() -> usize {
    20
}

pub struct AcademicHandler {
    scholar: Arc<dyn ScholarPort>,
}

impl AcademicHandler {
    pub fn new(scholar: Arc<dyn ScholarPort>) -> Self {
        Self { scholar }
    }
}

#[async_trait]
impl ToolHandler for AcademicHandler {
    async fn handle(&self, args: ValidatedArguments, _ctx: &HandlerContext) -> ToolResult {
        let action = match decode_args::<AcademicAction>("academic", &args) {
            Ok(action) => action,
            Err(result) => return result,
        };

        match action {
            AcademicAction::Search {
                query,
                limit,
                year_from,
                year_to,
            } => {
                let request = PaperQuery {
                    text: query,
                    limit,
                    year_from,
                    year_to,
                };
                match self.scholar.search_papers(&request).await {
                    Ok(papers) => {
                        let summary = format!("found {} for '{}'", plural(papers.len(), "paper"), request.text);
                        ToolResult::success(json!({ "papers": to_json(&papers) })).with_summary(summary)
                    }
                    Err(e) => backend_failure(e),
                }
            }
            AcademicAction::Paper { paper_id } => match self.scholar.get_paper(&paper_id).await {
                Ok(paper) => {
                    let summary = paper.title.clone();
                    ToolResult::success(to_json(&paper)).with_summary(summary)
                }
                Err(e) => backend_failure(e),
            },
            AcademicAction::Citations {
                paper_id,
                direction,
                limit,
            } => match self.scholar.citations(&paper_id, direction, limit).await {
                Ok(papers) => {
                    let relation = match direction {
                        CitationDirection::Citing => "citing",
                        CitationDirection::References => "referenced by",
                    };
                    let summary = format!("{} {} {}", plural(papers.len(), "paper"), relation, paper_id);
                    ToolResult::success(json!({
                        "paper_id": paper_id,
                        "direction": direction.as_str(),
                        "papers": to_json(&papers),
                    }))
                    .with_summary(summary)
                }
                Err(e) => backend_failure(e),
            },
        }
    }
}
