//! The paginated listing the feed reads from.
//!
//! The trait is async and mockable for testing.
use async_trait::async_trait;
use lazy_comic_common::{PageRequest, Record};

/// Why a page could not be fetched
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page. An empty page means there is nothing after it.
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, SourceError>;
}
