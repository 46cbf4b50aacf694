//! Semantic Scholar Graph API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::scholar::{PaperQuery, ScholarPort};
use scholar_domain::{CitationDirection, Paper};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.semanticscholar.org/graph/v1";

const FIELDS: &str = "title,year,authors,venue,citationCount,externalIds,abstract";

const SERVICE: &str = "Semantic Scholar";

#[derive(Debug, Clone)]
pub struct SemanticScholarClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl SemanticScholarClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::unavailable(SERVICE, format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
        paper_id: Option<&str>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| BackendError::unavailable(SERVICE, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| BackendError::unavailable(SERVICE, format!("bad response: {}", e)));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(match paper_id {
                Some(id) => BackendError::not_found("paper", id),
                None => BackendError::unavailable(SERVICE, format!("{} not found", path)),
            });
        }
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected(format!(
                "{} rejected the request: {}",
                SERVICE,
                body.trim()
            )));
        }
        Err(BackendError::unavailable(
            SERVICE,
            format!("HTTP {}", status.as_u16()),
        ))
    }
}

/// `year` filter syntax: `2015-2020`, `2015-` or `-2020`
fn year_filter(from: Option<i32>, to: Option<i32>) -> Option<String> {
    match (from, to) {
        (None, None) => None,
        (from, to) => Some(format!(
            "{}-{}",
            from.map(|y| y.to_string()).unwrap_or_default(),
            to.map(|y| y.to_string()).unwrap_or_default()
        )),
    }
}

#[async_trait]
impl ScholarPort for SemanticScholarClient {
    async fn search_papers(&self, query: &PaperQuery) -> Result<Vec<Paper>, BackendError> {
        let mut params = vec![
            ("query", query.text.clone()),
            ("limit", query.limit.to_string()),
            ("fields", FIELDS.to_string()),
        ];
        if let Some(years) = year_filter(query.year_from, query.year_to) {
            params.push(("year", years));
        }
        let page: SearchPage = self.get("/paper/search", &params, None).await?;
        Ok(page.data.into_iter().map(Paper::from).collect())
    }

    async fn get_paper(&self, paper_id: &str) -> Result<Paper, BackendError> {
        let raw: RawPaper = self
            .get(
                &format!("/paper/{}", paper_id),
                &[("fields", FIELDS.to_string())],
                Some(paper_id),
            )
            .await?;
        Ok(raw.into())
    }

    async fn citations(
        &self,
        paper_id: &str,
        direction: CitationDirection,
        limit: usize,
    ) -> Result<Vec<Paper>, BackendError> {
        let segment = match direction {
            CitationDirection::Citing => "citations",
            CitationDirection::References => "references",
        };
        let page: EdgePage = self
            .get(
                &format!("/paper/{}/{}", paper_id, segment),
                &[("fields", FIELDS.to_string()), ("limit", limit.to_string())],
                Some(paper_id),
            )
            .await?;
        Ok(page
            .data
            .into_iter()
            .filter_map(|edge| edge.citing_paper.or(edge.cited_paper))
            .filter(|raw| raw.paper_id.is_some())
            .map(Paper::from)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<RawPaper>,
}

#[derive(Debug, Deserialize)]
struct EdgePage {
    #[serde(default)]
    data: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    citing_paper: Option<RawPaper>,
    cited_paper: Option<RawPaper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaper {
    paper_id: Option<String>,
    title: Option<String>,
    year: Option<i32>,
    #[serde(default)]
    authors: Vec<RawAuthor>,
    venue: Option<String>,
    citation_count: Option<u64>,
    external_ids: Option<RawExternalIds>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

impl From<RawPaper> for Paper {
    fn from(raw: RawPaper) -> Self {
        Paper {
            paper_id: raw.paper_id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| "(untitled)".to_string()),
            year: raw.year,
            authors: raw.authors.into_iter().filter_map(|a| a.name).collect(),
            venue: raw.venue.filter(|v| !v.is_empty()),
            citation_count: raw.citation_count,
            doi: raw.external_ids.and_then(|ids| ids.doi),
            abstract_text: raw.abstract_text,
        }
    }
}
