#![allow(dead_code)]
use async_trait::async_trait;
use lazy_comic_core::common::{FeedSnapshot, PageRequest, Record};
use lazy_comic_core::{PageSource, SourceError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{watch, Semaphore};

/// Page source with a fixed number of records per page.
///
/// Pages past the end of `sizes` are empty. Attempts listed in `fail_attempts`
/// (1-based call numbers) fail with a 503. When gated, every fetch waits for a
/// permit released by the test.
pub struct ScriptedSource {
    sizes: Vec<usize>,
    fail_attempts: HashSet<usize>,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            fail_attempts: HashSet::new(),
            gate: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(sizes: Vec<usize>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(sizes)
        }
    }

    pub fn failing_on(mut self, attempts: &[usize]) -> Self {
        self.fail_attempts.extend(attempts.iter().copied());
        self
    }

    /// Let `n` gated fetches finish
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, SourceError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        if self.fail_attempts.contains(&attempt) {
            return Err(SourceError::Status(503));
        }

        let size = self
            .sizes
            .get(request.page as usize - 1)
            .copied()
            .unwrap_or(0);
        Ok(make_records(request.page, size))
    }
}

pub fn make_records(page: u32, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                format!("p{page}-{i}"),
                format!("Panel {page}.{i}"),
                format!("https://img.test/{page}/{i}.png"),
            )
        })
        .collect()
}

/// Wait until a snapshot satisfies `pred`, failing after 5 seconds
pub async fn wait_for<F>(rx: &mut watch::Receiver<FeedSnapshot>, pred: F) -> FeedSnapshot
where
    F: Fn(&FeedSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let current = rx.borrow_and_update().clone();
            if pred(&current) {
                return current;
            }
            rx.changed().await.expect("loader service stopped");
        }
    })
    .await
    .expect("timed out waiting for feed snapshot")
}

/// Give the service loop time to drain queued commands
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
