//! OCR simulator over snapshot page text.

use super::memory::InMemoryKnowledgeBase;
use async_trait::async_trait;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::ocr::OcrPort;
use scholar_domain::{OcrStatus, PageRange};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug)]
struct Job {
    remaining_polls: u32,
    outcome: OcrStatus,
}

/// [`OcrPort`] that "converts" the page text stored with each item.
///
/// A job stays [`OcrStatus::Pending`] for `pending_polls` polls before
/// reporting its outcome, so callers exercise their polling loop.
pub struct SimulatedOcr {
    knowledge_base: Arc<InMemoryKnowledgeBase>,
    pending_polls: u32,
    jobs: Mutex<HashMap<String, Job>>,
    next_job: AtomicU64,
}

impl SimulatedOcr {
    pub fn new(knowledge_base: Arc<InMemoryKnowledgeBase>) -> Self {
        Self {
            knowledge_base,
            pending_polls: 1,
            jobs: Mutex::new(HashMap::new()),
            next_job: AtomicU64::new(1),
        }
    }

    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }
}

/// Select the requested pages; bounds are 1-based and inclusive.
fn extract(pages: &[String], range: PageRange) -> OcrStatus {
    if pages.is_empty() {
        return OcrStatus::Failed {
            message: "document has no extractable text".to_string(),
        };
    }
    let total = pages.len() as u32;
    let start = range.start.unwrap_or(1).max(1);
    let end = range.end.unwrap_or(total).min(total);
    if start > total || start > end {
        return OcrStatus::Failed {
            message: format!(
                "pages {}-{} are outside the {}-page document",
                start,
                range.end.unwrap_or(total),
                total
            ),
        };
    }
    let selected = &pages[(start - 1) as usize..end as usize];
    OcrStatus::Completed {
        text: selected.join("\n\n"),
        page_count: selected.len() as u32,
    }
}

#[async_trait]
impl OcrPort for SimulatedOcr {
    async fn submit(&self, item_id: &str, pages: PageRange) -> Result<String, BackendError> {
        let Some(text) = self.knowledge_base.pages(item_id).await? else {
            return Err(BackendError::Rejected(format!(
                "item '{}' has no PDF attachment",
                item_id
            )));
        };
        let job_id = format!(
            "ocr-{}-{}",
            item_id,
            self.next_job.fetch_add(1, Ordering::Relaxed)
        );
        self.jobs.lock().await.insert(
            job_id.clone(),
            Job {
                remaining_polls: self.pending_polls,
                outcome: extract(&text, pages),
            },
        );
        Ok(job_id)
    }

    async fn poll(&self, job_id: &str) -> Result<OcrStatus, BackendError> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs
            .get_mut(job_id)
            .ok_or_else(|| BackendError::not_found("OCR job", job_id))?;
        if job.remaining_polls > 0 {
            job.remaining_polls -= 1;
            return Ok(OcrStatus::Pending);
        }
        Ok(job.outcome.clone())
    }
}
