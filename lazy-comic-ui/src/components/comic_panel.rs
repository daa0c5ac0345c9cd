//! Comic panel image - pure view

use crate::display_types::ComicPanel;
use dioxus::prelude::*;

/// Tiny blurred PNG shown behind a panel until the real image has loaded
pub const BLUR_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAABAAAAAQCAYAAAAf8/9hAAAAWElEQVR42mJgKtL9v3/+/5zwAJDUwKMjAxAMTTAxAwMjMwMDFGxgVIAZJG4kmBQMAAI0AYmjLOd6eMAAAAASUVORK5CYII=";

pub const PANEL_WIDTH: u32 = 800;
pub const PANEL_HEIGHT: u32 = 600;

/// Single feed image, lazily decoded, with a blur placeholder
#[component]
pub fn ComicPanelImage(panel: ComicPanel) -> Element {
    let mut loaded = use_signal(|| false);

    let placeholder_style = if loaded() {
        String::new()
    } else {
        format!("background-image: url('{BLUR_DATA_URL}');")
    };

    rsx! {
        div { class: "comic-image-wrapper", "data-testid": "comic-panel",
            img {
                class: "comic-image",
                src: "{panel.image_url}",
                alt: "{panel.title}",
                width: "{PANEL_WIDTH}",
                height: "{PANEL_HEIGHT}",
                "loading": "lazy",
                "decoding": "async",
                style: "{placeholder_style}",
                onload: move |_| loaded.set(true),
            }
        }
    }
}
