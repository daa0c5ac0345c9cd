use lazy_comic_common::SentinelOptions;
use lazy_comic_core::{LoaderHandle, ManualSentinel};
use std::io::Write;
use tracing::{info, warn};

/// Why a headless run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    PageLimit,
    FetchFailed,
    OutputClosed,
    LoaderStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub records: usize,
    pub pages: u32,
    pub reason: StopReason,
}

/// Run lazy-comic without a window.
///
/// Pages through the feed as if a reader kept scrolling to the bottom, and
/// writes one `id<TAB>name<TAB>avatar` line per record to stdout.
pub fn run(
    runtime: tokio::runtime::Runtime,
    loader: LoaderHandle,
    sentinel: SentinelOptions,
    max_pages: Option<u32>,
) -> HeadlessSummary {
    let summary = runtime.block_on(async {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        drain_feed(&loader, sentinel, max_pages, &mut out).await
    });
    loader.shutdown();

    info!(
        "Headless run finished: {} records from {} pages ({:?})",
        summary.records, summary.pages, summary.reason
    );
    summary
}

/// Keep triggering the sentinel after each page is written, until the feed
/// ends, the page limit is hit, or a fetch makes no progress.
pub async fn drain_feed<W: Write>(
    loader: &LoaderHandle,
    options: SentinelOptions,
    max_pages: Option<u32>,
    out: &mut W,
) -> HeadlessSummary {
    let sentinel = ManualSentinel::new();
    let _subscription = loader.attach_sentinel(&sentinel, options);
    let mut rx = loader.subscribe();

    let mut written = rx.borrow_and_update().items.len();
    let mut summary = HeadlessSummary {
        records: 0,
        pages: 0,
        reason: StopReason::LoaderStopped,
    };

    if max_pages == Some(0) {
        summary.reason = StopReason::PageLimit;
        return summary;
    }

    // An empty feed has the marker in view from the start
    sentinel.trigger();

    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.is_loading_more {
            continue;
        }

        for record in &snapshot.items[written..] {
            if writeln!(out, "{}\t{}\t{}", record.id, record.name, record.avatar).is_err() {
                summary.reason = StopReason::OutputClosed;
                return summary;
            }
            summary.records += 1;
        }

        if snapshot.exhausted {
            summary.reason = StopReason::Exhausted;
            break;
        }
        if snapshot.items.len() == written {
            warn!("Page {} could not be loaded, stopping", snapshot.cursor);
            summary.reason = StopReason::FetchFailed;
            break;
        }

        written = snapshot.items.len();
        summary.pages += 1;
        if max_pages.is_some_and(|max| summary.pages >= max) {
            summary.reason = StopReason::PageLimit;
            break;
        }

        sentinel.trigger();
    }

    let _ = out.flush();
    summary
}
