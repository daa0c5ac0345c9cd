use clap::Parser;
use lazy_comic_common::FailurePolicy;
use lazy_comic_core::{config, HttpPageSource, LoaderOptions, LoaderService};
use std::sync::Arc;
use tracing::{error, info};

mod headless;
mod ui;

pub use ui::AppContext;

#[derive(Parser, Debug)]
#[command(name = "lazy-comic", about = "Infinite-scroll comic reader")]
struct Args {
    /// Listing endpoint, queried with `limit` and `page`
    #[arg(long, env = "LAZY_COMIC_ENDPOINT")]
    endpoint: Option<String>,

    /// Records requested per page
    #[arg(long, env = "LAZY_COMIC_PAGE_SIZE")]
    page_size: Option<u32>,

    /// What a failed page fetch does to the feed
    #[arg(long, env = "LAZY_COMIC_ON_FETCH_ERROR", value_name = "resume|end-feed")]
    on_fetch_error: Option<FailurePolicy>,

    /// Print records to stdout instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many pages (headless only)
    #[arg(long, requires = "headless")]
    max_pages: Option<u32>,
}

impl Args {
    fn apply(&self, config: &mut config::Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(policy) = self.on_fetch_error {
            config.failure_policy = policy;
        }
    }
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stderr keeps headless stdout clean for piping
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    let args = Args::parse();
    configure_logging();

    let mut config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    args.apply(&mut config);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Feed endpoint {} (page size {}, on fetch error: {})",
        config.endpoint, config.page_size, config.failure_policy
    );
    let loader = LoaderService::start(
        Arc::new(HttpPageSource::new(config.endpoint.clone())),
        LoaderOptions::from(&config),
        runtime.handle().clone(),
    );

    if args.headless {
        headless::run(runtime, loader, config.sentinel, args.max_pages);
        return;
    }

    let ui_context = AppContext {
        loader,
        config: config.clone(),
    };

    info!("Starting UI");
    ui::launch_app(ui_context);
    info!("UI quit");
    drop(runtime);
}
