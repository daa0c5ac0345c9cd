use crate::ui::app_context::{use_config, use_loader};
use crate::ui::AppContext;
use dioxus::desktop::{Config as DioxusConfig, WindowBuilder};
use dioxus::prelude::*;
use lazy_comic_ui::{ComicFeedView, FeedDisplay};

pub fn make_config() -> DioxusConfig {
    DioxusConfig::default()
        .with_window(make_window())
        .with_background_color((0xff, 0xff, 0xff, 0xff))
}

fn make_window() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("Lazy Comic")
        .with_always_on_top(false)
        .with_decorations(true)
        .with_inner_size(dioxus::desktop::LogicalSize::new(1200, 800))
}

/// Root component: mirrors loader snapshots into the feed view
#[component]
pub fn App() -> Element {
    let loader = use_loader();
    let config = use_config();
    let mut feed = use_signal(|| FeedDisplay::from(&loader.snapshot()));

    let subscribe_loader = loader.clone();
    use_future(move || {
        let mut rx = subscribe_loader.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let display = FeedDisplay::from(&*rx.borrow_and_update());
                feed.set(display);
            }
            tracing::debug!("Loader snapshot channel closed");
        }
    });

    let shutdown_loader = loader.clone();
    use_drop(move || shutdown_loader.shutdown());

    let display = feed.read().clone();
    rsx! {
        ComicFeedView {
            panels: display.panels,
            is_loading_more: display.is_loading_more,
            exhausted: display.exhausted,
            sentinel: config.sentinel,
            on_sentinel_visible: move |_| loader.sentinel_visible(),
        }
    }
}

pub fn launch_app(context: AppContext) {
    LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context_provider(move || Box::new(context.clone()))
        .launch(App);
}
