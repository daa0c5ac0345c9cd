/// Stylesheet for the feed, injected once by the feed view
pub const FEED_CSS: &str = r#"
body { margin: 0; background: #0f1116; font-family: sans-serif; }
.comic-feed { height: 100vh; overflow-y: auto; overflow-anchor: none; }
.comic-feed-header h1 { text-align: center; color: #fff; }
.comic-container { display: flex; flex-direction: column; gap: 8px; }
.comic-image-wrapper { max-width: 800px; margin: 0 auto; width: 100%; }
.comic-image { width: 100%; height: auto; aspect-ratio: 4 / 3; display: block;
  background-size: cover; background-position: center; }
.comic-status { text-align: center; color: #fff; padding: 16px 0; }
.comic-spinner { display: inline-block; width: 16px; height: 16px; margin-right: 8px;
  border: 2px solid #555; border-bottom-color: #fff; border-radius: 50%;
  animation: comic-spin 1s linear infinite; vertical-align: middle; }
@keyframes comic-spin { to { transform: rotate(360deg); } }
#bottom-of-page { height: 1px; }
"#;
