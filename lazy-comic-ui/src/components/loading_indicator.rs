//! Loading indicator component

use dioxus::prelude::*;

/// Spinner with a message, shown while the next page is on its way
#[component]
pub fn LoadingIndicator(
    /// Message to display next to spinner (default: "Loading...")
    #[props(default = "Loading...".to_string())]
    message: String,
) -> Element {
    rsx! {
        p { class: "comic-status", "data-testid": "feed-loading",
            span { class: "comic-spinner" }
            "{message}"
        }
    }
}
