//! Web access port (search engine + page fetch).

use super::backend::BackendError;
use async_trait::async_trait;
use scholar_domain::{WebHit, WebPage};

#[async_trait]
pub trait WebPort: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<WebHit>, BackendError>;

    /// Fetch a page and reduce it to readable text.
    async fn fetch(&self, url: &str) -> Result<WebPage, BackendError>;
}

/// Adapter used when web access is disabled by configuration.
pub struct DisabledWeb;

#[async_trait]
impl WebPort for DisabledWeb {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<WebHit>, BackendError> {
        Err(BackendError::Rejected(
            "web access is disabled in this session".to_string(),
        ))
    }

    async fn fetch(&self, _url: &str) -> Result<WebPage, BackendError> {
        Err(BackendError::Rejected(
            "web access is disabled in this session".to_string(),
        ))
    }
}
