//! Display types for UI components
//!
//! Lightweight views of feed records, containing only what the panels render.

use lazy_comic_common::Record;

/// One panel of the feed
#[derive(Clone, Debug, PartialEq)]
pub struct ComicPanel {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

impl From<&Record> for ComicPanel {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            title: record.name.clone(),
            image_url: record.avatar.clone(),
        }
    }
}

/// Feed state as the view needs it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedDisplay {
    pub panels: Vec<ComicPanel>,
    pub is_loading_more: bool,
    pub exhausted: bool,
}

impl From<&lazy_comic_common::FeedSnapshot> for FeedDisplay {
    fn from(snapshot: &lazy_comic_common::FeedSnapshot) -> Self {
        Self {
            panels: snapshot.items.iter().map(ComicPanel::from).collect(),
            is_loading_more: snapshot.is_loading_more,
            exhausted: snapshot.exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_comic_common::FeedSnapshot;

    #[test]
    fn panel_takes_name_and_avatar() {
        let record = Record::new("3", "Issue 3", "https://img/3.png");
        let panel = ComicPanel::from(&record);
        assert_eq!(panel.id, "3");
        assert_eq!(panel.title, "Issue 3");
        assert_eq!(panel.image_url, "https://img/3.png");
    }

    #[test]
    fn feed_display_keeps_order_and_flags() {
        let snapshot = FeedSnapshot {
            items: vec![Record::new("1", "a", "x"), Record::new("2", "b", "y")],
            cursor: 2,
            is_loading_more: true,
            exhausted: false,
        };
        let display = FeedDisplay::from(&snapshot);
        assert_eq!(
            display.panels.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["1", "2"]
        );
        assert!(display.is_loading_more);
        assert!(!display.exhausted);
    }
}
