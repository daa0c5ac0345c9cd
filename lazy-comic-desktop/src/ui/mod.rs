pub mod app;
pub mod app_context;
pub use app::*;
pub use app_context::AppContext;
