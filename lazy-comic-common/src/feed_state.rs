use crate::{FailurePolicy, Record};

/// Request for one page of the listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// Result of one fetch as seen by the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The source answered; an empty page means the listing is exhausted
    Loaded(Vec<Record>),
    /// Transport, status or payload failure. The message is for logs only.
    Failed(String),
}

/// Coarse state of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Idle,
    Fetching,
    Exhausted,
}

/// Read model handed to the view after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub items: Vec<Record>,
    pub cursor: u32,
    pub is_loading_more: bool,
    pub exhausted: bool,
}

/// Pure state machine for incremental loading.
///
/// Decides when a page may be requested and folds fetch outcomes into the
/// accumulated item list, without any I/O.
#[derive(Debug, Clone)]
pub struct FeedState {
    items: Vec<Record>,
    cursor: u32,
    exhausted: bool,
    fetch_in_flight: bool,
    page_size: u32,
    failure_policy: FailurePolicy,
}

impl FeedState {
    pub fn new(page_size: u32, failure_policy: FailurePolicy) -> Self {
        Self {
            items: Vec::new(),
            cursor: 1,
            exhausted: false,
            fetch_in_flight: false,
            page_size: page_size.max(1),
            failure_policy,
        }
    }

    /// Called when the sentinel comes into range.
    ///
    /// Returns the request to issue, or `None` if a fetch is already in flight
    /// or the listing is exhausted. Marks the fetch as in flight.
    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        if self.fetch_in_flight || self.exhausted {
            return None;
        }
        self.fetch_in_flight = true;
        Some(PageRequest {
            page: self.cursor,
            limit: self.page_size,
        })
    }

    /// Fold the outcome of the in-flight fetch into the state.
    ///
    /// Always clears the in-flight guard. A completion with no fetch in flight
    /// is ignored and reported as `None`.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Option<LoaderPhase> {
        if !self.fetch_in_flight {
            return None;
        }
        self.fetch_in_flight = false;

        match outcome {
            FetchOutcome::Loaded(records) if records.is_empty() => {
                self.exhausted = true;
            }
            FetchOutcome::Loaded(records) => {
                self.items.extend(records);
                match self.cursor.checked_add(1) {
                    Some(next) => self.cursor = next,
                    // No page number left to ask for
                    None => self.exhausted = true,
                }
            }
            FetchOutcome::Failed(_) => {
                if self.failure_policy == FailurePolicy::EndFeed {
                    self.exhausted = true;
                }
            }
        }

        Some(self.phase())
    }

    pub fn phase(&self) -> LoaderPhase {
        if self.exhausted {
            LoaderPhase::Exhausted
        } else if self.fetch_in_flight {
            LoaderPhase::Fetching
        } else {
            LoaderPhase::Idle
        }
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            cursor: self.cursor,
            is_loading_more: self.fetch_in_flight,
            exhausted: self.exhausted,
        }
    }
}
