//! Feed UI components

pub mod comic_feed;
pub mod comic_panel;
pub mod loading_indicator;

pub use comic_feed::ComicFeedView;
pub use comic_panel::{ComicPanelImage, BLUR_DATA_URL};
pub use loading_indicator::LoadingIndicator;
