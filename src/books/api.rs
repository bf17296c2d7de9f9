//! Client for the books search proxy

use clap::ValueEnum;
use std::time::Duration;
use tracing::{debug, warn};

use super::book::SearchResponse;
use super::error::ApiError;

const USER_AGENT: &str = concat!("coverly/", env!("CARGO_PKG_VERSION"));

const GENERIC_FAILURE: &str = "Failed to search books. Please try again.";

/// Where a search is issued from; each call site shows a fixed number of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchScope {
    /// Single best match, used when resolving a book by title
    Detail,
    /// Home screen result list
    Home,
    /// Picker used when filling a board
    Board,
    /// Everything the proxy returns, up to 10
    Full,
}

impl SearchScope {
    pub fn cap(self) -> usize {
        match self {
            SearchScope::Detail => 1,
            SearchScope::Home => 3,
            SearchScope::Board => 6,
            SearchScope::Full => 10,
        }
    }
}

/// HTTP client for `GET {base}/books/search`
#[derive(Debug, Clone)]
pub struct BooksClient {
    client: reqwest::Client,
    base_url: String,
}

impl BooksClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|_| ApiError::Other(GENERIC_FAILURE))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search by title with an optional author filter.
    ///
    /// Blank titles short-circuit to an empty response without a request.
    /// With an author, upstream items are re-filtered locally and
    /// `total_items` becomes the filtered count. Single attempt, no retries.
    pub async fn search(
        &self,
        title: &str,
        author: Option<&str>,
        scope: SearchScope,
    ) -> Result<SearchResponse, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(SearchResponse::default());
        }

        let author = author.map(str::trim).filter(|a| !a.is_empty());
        let query = build_query(title, author);
        let url = format!(
            "{}/books/search?q={}",
            self.base_url,
            urlencoding::encode(&query)
        );
        debug!(%url, "searching books");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!("books search request failed: {}", e);
                ApiError::from_transport(&e, GENERIC_FAILURE)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ApiError::InvalidQuery);
        }
        if status.is_server_error() {
            return Err(ApiError::Server(status));
        }
        if !status.is_success() {
            warn!("books search returned status {}", status);
            return Err(ApiError::Other(GENERIC_FAILURE));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            warn!("failed to parse books search response: {}", e);
            ApiError::from_transport(&e, GENERIC_FAILURE)
        })?;

        Ok(narrow_results(body, author, scope.cap()))
    }
}

/// Build the upstream query, embedding the author filter syntax when present
pub fn build_query(title: &str, author: Option<&str>) -> String {
    match author {
        Some(author) => format!("{} inauthor:{}", title, author),
        None => title.to_string(),
    }
}

/// Apply the local author filter and truncate to `cap`
fn narrow_results(mut body: SearchResponse, author: Option<&str>, cap: usize) -> SearchResponse {
    if let Some(author) = author {
        body.items.retain(|book| book.has_author_matching(author));
        body.total_items = body.items.len() as u64;
    }
    body.items.truncate(cap);
    body
}
