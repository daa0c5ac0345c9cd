//! Incremental loader: decides when to fetch, fetches, and folds results.

use crate::source::PageSource;
use lazy_comic_common::{
    FailurePolicy, FeedSnapshot, FeedState, FetchOutcome, LoaderPhase, PageRequest,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Page size and failure handling for one loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub page_size: u32,
    pub failure_policy: FailurePolicy,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl From<&crate::config::Config> for LoaderOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            page_size: config.page_size,
            failure_policy: config.failure_policy,
        }
    }
}

/// Owns the feed state and the source it pages through.
///
/// The sentinel handler and the completion handler are separate calls so a
/// caller can run the fetch elsewhere and report back; `load_next` does all
/// three inline.
pub struct IncrementalLoader {
    state: FeedState,
    source: Arc<dyn PageSource>,
}

impl IncrementalLoader {
    pub fn new(source: Arc<dyn PageSource>, options: LoaderOptions) -> Self {
        Self {
            state: FeedState::new(options.page_size, options.failure_policy),
            source,
        }
    }

    pub fn source(&self) -> Arc<dyn PageSource> {
        self.source.clone()
    }

    /// The sentinel came into range. Returns the page to fetch, if any.
    pub fn on_sentinel_visible(&mut self) -> Option<PageRequest> {
        let request = self.state.begin_fetch();
        match request {
            Some(request) => debug!("Requesting page {}", request.page),
            None if self.state.is_exhausted() => debug!("Sentinel ignored: feed exhausted"),
            None => debug!("Sentinel ignored: fetch already in flight"),
        }
        request
    }

    /// Fetch one page. Failures are logged and reported as `Failed`, never raised.
    pub async fn fetch_page(source: &dyn PageSource, request: PageRequest) -> FetchOutcome {
        match source.fetch_page(request).await {
            Ok(records) => FetchOutcome::Loaded(records),
            Err(e) => {
                warn!("Error fetching page {}: {}", request.page, e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Fold a fetch outcome into the feed. The in-flight guard is always cleared.
    pub fn on_fetch_complete(&mut self, outcome: FetchOutcome) -> LoaderPhase {
        let appended = match &outcome {
            FetchOutcome::Loaded(records) => records.len(),
            FetchOutcome::Failed(_) => 0,
        };
        let failed = matches!(outcome, FetchOutcome::Failed(_));

        let Some(phase) = self.state.complete_fetch(outcome) else {
            warn!("Fetch completion arrived with no fetch in flight, ignoring");
            return self.state.phase();
        };

        match phase {
            LoaderPhase::Exhausted if failed => {
                info!(
                    "Feed ended after failed fetch ({} policy), {} items",
                    self.state.failure_policy(),
                    self.state.items().len()
                );
            }
            LoaderPhase::Exhausted => {
                info!("Feed exhausted after {} items", self.state.items().len());
            }
            _ if appended > 0 => {
                info!(
                    "Appended {} items (total {}), next page {}",
                    appended,
                    self.state.items().len(),
                    self.state.cursor()
                );
            }
            _ => {}
        }
        phase
    }

    /// Sentinel, fetch and completion in one step.
    ///
    /// Returns `None` if the sentinel was a no-op.
    pub async fn load_next(&mut self) -> Option<LoaderPhase> {
        let request = self.on_sentinel_visible()?;
        let outcome = Self::fetch_page(self.source.as_ref(), request).await;
        Some(self.on_fetch_complete(outcome))
    }

    pub fn phase(&self) -> LoaderPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.snapshot()
    }
}
