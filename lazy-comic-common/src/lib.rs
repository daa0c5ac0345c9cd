mod failure_policy;
mod feed_state;
mod record;
mod sentinel;

pub use failure_policy::FailurePolicy;
pub use feed_state::{FeedSnapshot, FeedState, FetchOutcome, LoaderPhase, PageRequest};
pub use record::Record;
pub use sentinel::{intersection_ratio, Rect, SentinelOptions, SentinelTracker};
