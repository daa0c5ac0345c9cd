use lazy_comic_common::SentinelOptions;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Called with the marker's visibility each time it is reported
pub type VisibilityHandler = Box<dyn Fn(bool) + Send + Sync>;

/// Something that can watch the bottom marker and report when it comes into range.
pub trait ViewportSentinel: Send + Sync {
    fn observe(&self, options: SentinelOptions, handler: VisibilityHandler)
        -> SentinelSubscription;
}

/// Live registration with a sentinel. Dropping it unregisters the handler.
#[must_use = "dropping the subscription stops visibility callbacks"]
pub struct SentinelSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SentinelSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release now instead of at drop
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SentinelSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for SentinelSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentinelSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<u64, (SentinelOptions, Arc<VisibilityHandler>)>,
}

/// Sentinel that reports visibility only when told to.
///
/// Headless mode uses it to simulate the reader reaching the bottom of the
/// feed; tests use it to fire on demand.
#[derive(Clone, Default)]
pub struct ManualSentinel {
    registry: Arc<Mutex<Registry>>,
}

impl ManualSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the marker as visible to every observer
    pub fn trigger(&self) {
        self.report(true);
    }

    /// Report a visibility reading to every observer
    pub fn report(&self, visible: bool) {
        // Call outside the lock so handlers may re-enter the sentinel
        let handlers: Vec<Arc<VisibilityHandler>> = match self.registry.lock() {
            Ok(registry) => registry.handlers.values().map(|(_, h)| h.clone()).collect(),
            Err(_) => return,
        };
        for handler in handlers {
            handler(visible);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.handlers.len())
            .unwrap_or(0)
    }
}

impl ViewportSentinel for ManualSentinel {
    fn observe(
        &self,
        options: SentinelOptions,
        handler: VisibilityHandler,
    ) -> SentinelSubscription {
        let id = match self.registry.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.handlers.insert(id, (options, Arc::new(handler)));
                id
            }
            Err(_) => return SentinelSubscription::new(|| {}),
        };

        let registry = self.registry.clone();
        SentinelSubscription::new(move || {
            if let Ok(mut registry) = registry.lock() {
                registry.handlers.remove(&id);
            }
        })
    }
}
