//! Academic index adapters.
//!
//! [`SemanticScholarClient`] talks to the Semantic Scholar Graph API and
//! needs the `web-tools` feature. [`OfflineScholar`] stands in when the
//! network tools are compiled out or disabled in configuration.

#[cfg(feature = "web-tools")]
mod semantic_scholar;

#[cfg(feature = "web-tools")]
pub use semantic_scholar::{DEFAULT_API_URL, SemanticScholarClient};

use async_trait::async_trait;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::scholar::{PaperQuery, ScholarPort};
use scholar_domain::{CitationDirection, Paper};

/// Every lookup fails with [`BackendError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineScholar;

impl OfflineScholar {
    fn unavailable<T>() -> Result<T, BackendError> {
        Err(BackendError::unavailable(
            "academic index",
            "network tools are disabled",
        ))
    }
}

#[async_trait]
impl ScholarPort for OfflineScholar {
    async fn search_papers(&self, _query: &PaperQuery) -> Result<Vec<Paper>, BackendError> {
        Self::unavailable()
    }

    async fn get_paper(&self, _paper_id: &str) -> Result<Paper, BackendError> {
        Self::unavailable()
    }

    async fn citations(
        &self,
        _paper_id: &str,
        _direction: CitationDirection,
        _limit: usize,
    ) -> Result<Vec<Paper>, BackendError> {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_scholar_is_unavailable() {
        let err = OfflineScholar.get_paper("P1").await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable { .. }));
        assert_eq!(
            err.to_string(),
            "academic index unavailable: network tools are disabled"
        );
    }
}
