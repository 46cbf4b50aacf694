//! `read_pdf`: submit an OCR job for the item's attachment and poll until
//! it completes, fails, or the deadline passes.

use super::backend_failure;
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::ports::ocr::OcrPort;
use crate::tools::dispatch::{HandlerContext, ToolHandler, decode_args};
use async_trait::async_trait;
use scholar_domain::core::string::clip_chars;
use scholar_domain::tool::{ToolError, ToolResult, ValidatedArguments};
use scholar_domain::{OcrStatus, PageRange};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ReadPdfArgs {
    item_id: String,
    #[serde(default)]
    start_page: Option<u32>,
    #[serde(default)]
    end_page: Option<u32>,
}

pub struct ReadPdfHandler {
    knowledge_base: Arc<dyn KnowledgeBasePort>,
    ocr: Arc<dyn OcrPort>,
    poll_interval: Duration,
    timeout: Duration,
}

impl ReadPdfHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBasePort>, ocr: Arc<dyn OcrPort>) -> Self {
        Self {
            knowledge_base,
            ocr,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn wait_for(&self, job_id: &str) -> Result<(String, u32), ToolError> {
        let started = Instant::now();
        loop {
            match self.ocr.poll(job_id).await? {
                OcrStatus::Completed { text, page_count } => return Ok((text, page_count)),
                OcrStatus::Failed { message } => {
                    return Err(ToolError::handler(format!("OCR job {} failed: {}", job_id, message)));
                }
                OcrStatus::Pending => {}
            }
            if started.elapsed() >= self.timeout {
                warn!("OCR job {} still pending after {:?}", job_id, self.timeout);
                return Err(ToolError::handler(format!(
                    "OCR job {} did not finish within {}s",
                    job_id,
                    self.timeout.as_secs_f32()
                )));
            }
            debug!("OCR job {} pending", job_id);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ToolHandler for ReadPdfHandler {
    async fn handle(&self, args: ValidatedArguments, ctx: &HandlerContext) -> ToolResult {
        let args: ReadPdfArgs = match decode_args("read_pdf", &args) {
            Ok(args) => args,
            Err(result) => return result,
        };

        let item = match self.knowledge_base.get_item(&args.item_id).await {
            Ok(item) => item,
            Err(e) => return backend_failure(e),
        };
        if !item.has_pdf {
            return ToolResult::failure(ToolError::handler(format!(
                "item '{}' has no PDF attachment",
                item.id
            )));
        }

        let pages = PageRange {
            start: args.start_page,
            end: args.end_page,
        };
        let job_id = match self.ocr.submit(&item.id, pages).await {
            Ok(job) => job,
            Err(e) => return backend_failure(e),
        };
        debug!("Submitted OCR job {} for {}", job_id, item.id);

        let (text, page_count) = match self.wait_for(&job_id).await {
            Ok(done) => done,
            Err(e) => return ToolResult::failure(e),
        };

        let (clipped, truncated) = clip_chars(&text, ctx.config.max_content_chars);
        let mut summary = format!("read {} pages of '{}'", page_count, item.title);
        if truncated {
            summary.push_str(" (truncated)");
        }
        ToolResult::success(json!({
            "item_id": item.id,
            "page_count": page_count,
            "text": clipped,
            "truncated": truncated,
        }))
        .with_summary(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{FakeKnowledgeBase, ScriptedOcr, checked, ctx};

    fn fast(kb: Arc<FakeKnowledgeBase>, ocr: ScriptedOcr) -> ReadPdfHandler {
        ReadPdfHandler::new(kb, Arc::new(ocr))
            .with_poll_interval(Duration::from_millis(1))
            .with_timeout(Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_polls_until_completed() {
        let ocr = ScriptedOcr::new(
            2,
            OcrStatus::Completed {
                text: "page text".to_string(),
                page_count: 3,
            },
        );
        let result = fast(FakeKnowledgeBase::seeded(), ocr)
            .handle(checked(json!({"item_id": "I1"})), &ctx())
            .await;
        let data = result.data().unwrap();
        assert_eq!(data["text"], "page text");
        assert_eq!(data["page_count"], 3);
    }

    #[tokio::test]
    async fn test_job_failure_is_reported() {
        let ocr = ScriptedOcr::new(
            0,
            OcrStatus::Failed {
                message: "encrypted".to_string(),
            },
        );
        let result = fast(FakeKnowledgeBase::seeded(), ocr)
            .handle(checked(json!({"item_id": "I1"})), &ctx())
            .await;
        assert_eq!(result.error().unwrap().message, "OCR job job-I1 failed: encrypted");
    }

    #[tokio::test]
    async fn test_times_out() {
        let ocr = ScriptedOcr::new(usize::MAX, OcrStatus::Pending);
        let handler = ReadPdfHandler::new(FakeKnowledgeBase::seeded(), Arc::new(ocr))
            .with_poll_interval(Duration::from_millis(1))
            .with_timeout(Duration::from_millis(10));
        let result = handler.handle(checked(json!({"item_id": "I1"})), &ctx()).await;
        assert!(result.error().unwrap().message.contains("did not finish within"));
    }

    #[tokio::test]
    async fn test_item_without_pdf() {
        let kb = FakeKnowledgeBase::seeded();
        kb.state.lock().unwrap().items.get_mut("I2").unwrap().has_pdf = false;
        let ocr = ScriptedOcr::new(0, OcrStatus::Pending);
        let result = fast(kb, ocr)
            .handle(checked(json!({"item_id": "I2"})), &ctx())
            .await;
        assert_eq!(result.error().unwrap().message, "item 'I2' has no PDF attachment");
    }
}
