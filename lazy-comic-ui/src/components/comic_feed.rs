//! Infinite-scroll comic feed
//!
//! The feed is its own scroll container. A marker at the bottom is measured
//! against the container on mount, on scroll, and whenever panels are added;
//! crossing into range calls `on_sentinel_visible`.

use crate::components::comic_panel::ComicPanelImage;
use crate::components::loading_indicator::LoadingIndicator;
use crate::display_types::ComicPanel;
use crate::styles::FEED_CSS;
use dioxus::prelude::*;
use lazy_comic_common::{Rect, SentinelOptions, SentinelTracker};
use std::rc::Rc;

/// Comic feed page - pure view with a visibility callback
#[component]
pub fn ComicFeedView(
    panels: Vec<ComicPanel>,
    is_loading_more: bool,
    exhausted: bool,
    #[props(default)] sentinel: SentinelOptions,
    /// Called when the bottom marker comes into range
    on_sentinel_visible: EventHandler<()>,
    #[props(default = "Lazy Comic".to_string())] title: String,
) -> Element {
    let mut container: Signal<Option<Rc<MountedData>>> = use_signal(|| None);
    let mut marker: Signal<Option<Rc<MountedData>>> = use_signal(|| None);
    let mut tracker = use_signal(SentinelTracker::new);

    let panel_count = panels.len();

    let measure = move || {
        let (Some(viewport_el), Some(marker_el)) =
            (container.peek().clone(), marker.peek().clone())
        else {
            return;
        };
        spawn(async move {
            let (Ok(viewport), Ok(target)) = (
                viewport_el.get_client_rect().await,
                marker_el.get_client_rect().await,
            ) else {
                return;
            };
            let viewport = Rect::new(
                viewport.origin.x,
                viewport.origin.y,
                viewport.width(),
                viewport.height(),
            );
            let target = Rect::new(
                target.origin.x,
                target.origin.y,
                target.width(),
                target.height(),
            );
            let visible = sentinel.is_visible(target, viewport);
            if tracker.write().observe(visible) {
                tracing::debug!("Feed sentinel in range");
                on_sentinel_visible.call(());
            }
        });
    };

    // Re-arm and re-measure whenever the feed grows or resets
    use_effect(use_reactive!(|(panel_count,)| {
        tracing::trace!("Feed has {} panels, re-measuring sentinel", panel_count);
        tracker.write().rearm();
        measure();
    }));

    rsx! {
        style { "{FEED_CSS}" }
        div {
            class: "comic-feed",
            onmounted: move |evt| {
                container.set(Some(evt.data()));
                measure();
            },
            onscroll: move |_| measure(),

            header { class: "comic-feed-header",
                h1 { "{title}" }
            }

            if !panels.is_empty() {
                div { class: "comic-container",
                    for panel in panels.iter() {
                        ComicPanelImage { key: "{panel.id}", panel: panel.clone() }
                    }
                }
            }

            if is_loading_more {
                LoadingIndicator {}
            }

            if exhausted {
                p { class: "comic-status", "data-testid": "feed-end", "You've reached the end" }
            } else {
                div {
                    id: "bottom-of-page",
                    onmounted: move |evt| {
                        marker.set(Some(evt.data()));
                        measure();
                    },
                }
            }
        }
    }
}
