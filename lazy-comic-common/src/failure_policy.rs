use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the feed does when a page fetch fails.
///
/// A failed fetch never advances the cursor. The policy only decides whether
/// the feed stays open for the next sentinel signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Go back to idle; the next sentinel signal requests the same page again.
    Resume,
    /// Treat the failure like an empty page and end the feed.
    EndFeed,
}

#[allow(clippy::derivable_impls)]
impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Resume
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Resume => write!(f, "resume"),
            FailurePolicy::EndFeed => write!(f, "end-feed"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resume" => Ok(FailurePolicy::Resume),
            "end-feed" | "end_feed" | "endfeed" => Ok(FailurePolicy::EndFeed),
            other => Err(format!(
                "unknown failure policy '{other}' (expected 'resume' or 'end-feed')"
            )),
        }
    }
}
