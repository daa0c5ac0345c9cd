use dioxus::prelude::*;
use lazy_comic_core::{config, LoaderHandle};

#[derive(Clone)]
pub struct AppContext {
    pub loader: LoaderHandle,
    pub config: config::Config,
}

/// Hook to access the feed loader from components
pub fn use_loader() -> LoaderHandle {
    use_context::<AppContext>().loader
}

/// Hook to access the config from components
pub fn use_config() -> config::Config {
    use_context::<AppContext>().config
}
