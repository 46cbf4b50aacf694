//! OCR conversion port.
//!
//! Conversion is asynchronous on the backend side: a job is submitted and
//! then polled. The polling cadence and deadline belong to the caller.

use super::backend::BackendError;
use async_trait::async_trait;
use scholar_domain::{OcrStatus, PageRange};

#[async_trait]
pub trait OcrPort: Send + Sync {
    /// Start converting the item's PDF attachment. Returns a job id.
    async fn submit(&self, item_id: &str, pages: PageRange) -> Result<String, BackendError>;

    async fn poll(&self, job_id: &str) -> Result<OcrStatus, BackendError>;
}
