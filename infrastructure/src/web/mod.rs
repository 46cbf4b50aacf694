//! **Web adapter**: DuckDuckGo search and page fetching for the `web` tool.
//!
//! Gated behind the `web-tools` Cargo feature:
//!
//! ```toml
//! # infrastructure/Cargo.toml
//! [features]
//! web-tools = ["dep:reqwest", "dep:scraper"]
//! ```
//!
//! | Operation | Backend | Key dependency |
//! |-----------|---------|----------------|
//! | `search` | DuckDuckGo Instant Answer API (no API key) | `reqwest` |
//! | `fetch` | plain GET, HTML reduced to readable text | `reqwest` + `scraper` |

mod fetch;
mod search;

pub use fetch::html_to_text;

use async_trait::async_trait;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::web::WebPort;
use scholar_domain::{WebHit, WebPage};
use std::time::Duration;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Largest response body accepted by `fetch`
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

const SERVICE: &str = "web";

/// [`WebPort`] backed by DuckDuckGo and direct HTTP fetches.
#[derive(Debug, Clone)]
pub struct DuckDuckGoWeb {
    client: reqwest::Client,
    user_agent: String,
    api_url: String,
}

impl DuckDuckGoWeb {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::unavailable(SERVICE, format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
            api_url: DDG_API_URL.to_string(),
        })
    }

    /// Point searches at another Instant-Answer-compatible endpoint.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl WebPort for DuckDuckGoWeb {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<WebHit>, BackendError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| BackendError::unavailable(SERVICE, format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BackendError::unavailable(
                SERVICE,
                format!("search API returned {}", response.status()),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            BackendError::unavailable(SERVICE, format!("could not parse search results: {}", e))
        })?;
        Ok(search::collect_hits(&body, limit))
    }

    async fn fetch(&self, url: &str) -> Result<WebPage, BackendError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| BackendError::unavailable(SERVICE, format!("failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected(format!(
                "{} returned HTTP {} {}",
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }
        if response.content_length().unwrap_or(0) > MAX_BODY_SIZE as u64 {
            return Err(BackendError::Rejected(format!(
                "{} is larger than {} bytes",
                url, MAX_BODY_SIZE
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.bytes().await.map_err(|e| {
            BackendError::unavailable(SERVICE, format!("failed to read body of {}: {}", url, e))
        })?;
        if body.len() > MAX_BODY_SIZE {
            return Err(BackendError::Rejected(format!(
                "{} is larger than {} bytes",
                url, MAX_BODY_SIZE
            )));
        }

        Ok(fetch::to_page(url, &content_type, &String::from_utf8_lossy(&body)))
    }
}
