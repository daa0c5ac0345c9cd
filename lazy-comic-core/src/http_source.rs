use crate::source::{PageSource, SourceError};
use async_trait::async_trait;
use lazy_comic_common::{PageRequest, Record};
use tracing::debug;

/// Reads pages from `GET {endpoint}?limit={limit}&page={page}`.
///
/// The body must be a JSON array of records; an empty array ends the listing.
pub struct HttpPageSource {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, SourceError> {
        debug!(
            "GET {} (limit={}, page={})",
            self.endpoint, request.limit, request.page
        );

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("limit", request.limit), ("page", request.page)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }

        let body = resp.bytes().await?;
        let records: Vec<Record> = serde_json::from_slice(&body)?;
        Ok(records)
    }
}
