use crate::loader::{IncrementalLoader, LoaderOptions};
use crate::sentinel::{SentinelSubscription, ViewportSentinel};
use crate::source::PageSource;
use lazy_comic_common::{FeedSnapshot, FetchOutcome, PageRequest, SentinelOptions};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Commands processed by the loader service, in arrival order
#[derive(Debug, Clone)]
pub enum LoaderCommand {
    /// The bottom marker came into range
    SentinelVisible,
    /// A fetch task finished; posted back by the task itself
    FetchCompleted {
        request: PageRequest,
        outcome: FetchOutcome,
    },
    Shutdown,
}

/// Handle to the loader service for sending signals and reading state
#[derive(Clone)]
pub struct LoaderHandle {
    command_tx: mpsc::UnboundedSender<LoaderCommand>,
    snapshot_rx: watch::Receiver<FeedSnapshot>,
}

impl LoaderHandle {
    pub fn sentinel_visible(&self) {
        let _ = self.command_tx.send(LoaderCommand::SentinelVisible);
    }

    /// Stop the service. An in-flight fetch is not cancelled, its result is dropped.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(LoaderCommand::Shutdown);
    }

    /// Receiver that is notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Route a sentinel's visibility reports into this loader.
    ///
    /// Only visible readings are forwarded. Drop the subscription to detach.
    pub fn attach_sentinel(
        &self,
        sentinel: &dyn ViewportSentinel,
        options: SentinelOptions,
    ) -> SentinelSubscription {
        let command_tx = self.command_tx.clone();
        sentinel.observe(
            options,
            Box::new(move |visible| {
                if visible {
                    let _ = command_tx.send(LoaderCommand::SentinelVisible);
                }
            }),
        )
    }
}

/// Runs one `IncrementalLoader` on a single task.
///
/// Fetches run as separate tasks that post `FetchCompleted` back into the
/// command channel, so signals that arrive mid-fetch are seen (and ignored)
/// by the same loop that applies the result.
pub struct LoaderService {
    loader: IncrementalLoader,
    command_rx: mpsc::UnboundedReceiver<LoaderCommand>,
    command_tx: mpsc::WeakUnboundedSender<LoaderCommand>,
    snapshot_tx: watch::Sender<FeedSnapshot>,
    runtime_handle: tokio::runtime::Handle,
}

impl LoaderService {
    pub fn start(
        source: Arc<dyn PageSource>,
        options: LoaderOptions,
        runtime_handle: tokio::runtime::Handle,
    ) -> LoaderHandle {
        let loader = IncrementalLoader::new(source, options);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(loader.snapshot());

        let handle = LoaderHandle {
            command_tx: command_tx.clone(),
            snapshot_rx,
        };

        let mut service = LoaderService {
            loader,
            command_rx,
            command_tx: command_tx.downgrade(),
            snapshot_tx,
            runtime_handle: runtime_handle.clone(),
        };
        runtime_handle.spawn(async move {
            service.run().await;
        });

        handle
    }

    async fn run(&mut self) {
        info!("LoaderService started");
        while let Some(command) = self.command_rx.recv().await {
            match command {
                LoaderCommand::SentinelVisible => {
                    if let Some(request) = self.loader.on_sentinel_visible() {
                        self.spawn_fetch(request);
                        self.publish();
                    }
                }
                LoaderCommand::FetchCompleted { request, outcome } => {
                    debug!("Page {} completed", request.page);
                    self.loader.on_fetch_complete(outcome);
                    self.publish();
                }
                LoaderCommand::Shutdown => break,
            }
        }
        info!("LoaderService stopped");
    }

    fn spawn_fetch(&self, request: PageRequest) {
        let source = self.loader.source();
        let command_tx = self.command_tx.clone();
        self.runtime_handle.spawn(async move {
            let outcome = IncrementalLoader::fetch_page(source.as_ref(), request).await;
            if let Some(command_tx) = command_tx.upgrade() {
                let _ = command_tx.send(LoaderCommand::FetchCompleted { request, outcome });
            }
        });
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.loader.snapshot());
    }
}
