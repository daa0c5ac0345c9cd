//! lazy-comic-core - incremental loading of a paginated image listing
//!
//! Holds the I/O side of the feed: configuration, the page source and its
//! HTTP implementation, the loader controller, and the service that runs it.

pub mod config;
pub mod http_source;
pub mod loader;
pub mod sentinel;
pub mod service;
pub mod source;

pub use config::{Config, ConfigError};
pub use http_source::HttpPageSource;
pub use loader::{IncrementalLoader, LoaderOptions};
pub use sentinel::{ManualSentinel, SentinelSubscription, ViewportSentinel, VisibilityHandler};
pub use service::{LoaderCommand, LoaderHandle, LoaderService};
pub use source::{PageSource, SourceError};

pub use lazy_comic_common as common;
