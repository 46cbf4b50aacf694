//! Academic index port (paper search and citation graph).

use super::backend::BackendError;
use async_trait::async_trait;
use scholar_domain::{CitationDirection, Paper};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperQuery {
    pub text: String,
    pub limit: usize,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

#[async_trait]
pub trait ScholarPort: Send + Sync {
    async fn search_papers(&self, query: &PaperQuery) -> Result<Vec<Paper>, BackendError>;

    async fn get_paper(&self, paper_id: &str) -> Result<Paper, BackendError>;

    async fn citations(
        &self,
        paper_id: &str,
        direction: CitationDirection,
        limit: usize,
    ) -> Result<Vec<Paper>, BackendError>;
}
