//! Geometry for the bottom-of-feed sentinel.
//!
//! Mirrors intersection-observer semantics: the viewport is grown by a root
//! margin on every side, and the marker counts as visible once the share of
//! its area inside that region reaches the threshold.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

/// Share of `marker`'s area inside `viewport` grown by `root_margin`.
///
/// Returns `None` when the two do not touch at all. Edge contact counts as
/// intersecting. A zero-area marker that intersects has a ratio of 1.0.
pub fn intersection_ratio(marker: Rect, viewport: Rect, root_margin: f64) -> Option<f64> {
    let root = viewport.expand(root_margin);

    let left = marker.x.max(root.x);
    let right = marker.right().min(root.right());
    let top = marker.y.max(root.y);
    let bottom = marker.bottom().min(root.bottom());

    if left > right || top > bottom {
        return None;
    }

    let marker_area = marker.area();
    if marker_area <= 0.0 {
        return Some(1.0);
    }
    Some(((right - left) * (bottom - top) / marker_area).clamp(0.0, 1.0))
}

/// Trigger region for the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentinelOptions {
    /// Distance ahead of the viewport edge that already counts as in range
    pub root_margin: f64,
    /// Minimum visible share of the marker
    pub threshold: f64,
}

impl Default for SentinelOptions {
    fn default() -> Self {
        Self {
            root_margin: 200.0,
            threshold: 0.1,
        }
    }
}

impl SentinelOptions {
    pub fn is_visible(&self, marker: Rect, viewport: Rect) -> bool {
        intersection_ratio(marker, viewport, self.root_margin)
            .is_some_and(|ratio| ratio >= self.threshold)
    }
}

/// Edge detector over successive visibility readings.
///
/// Reports only the transition into range, so a marker that stays visible
/// across scroll events fires once.
#[derive(Debug, Clone, Default)]
pub struct SentinelTracker {
    was_visible: bool,
}

impl SentinelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading. Returns true if the marker just came into range.
    pub fn observe(&mut self, visible: bool) -> bool {
        let crossed = visible && !self.was_visible;
        self.was_visible = visible;
        crossed
    }

    /// Forget the last reading so the next visible one fires again.
    ///
    /// Called after the feed changes: content above the marker moved, so a
    /// marker still in range is a fresh request for more.
    pub fn rearm(&mut self) {
        self.was_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_marker_inside_viewport_is_fully_visible() {
        let marker = Rect::new(0.0, 100.0, 800.0, 10.0);
        assert_eq!(intersection_ratio(marker, viewport(), 0.0), Some(1.0));
    }

    #[test]
    fn test_marker_below_margin_is_not_intersecting() {
        let marker = Rect::new(0.0, 900.0, 800.0, 10.0);
        assert_eq!(intersection_ratio(marker, viewport(), 200.0), None);
    }

    #[test]
    fn test_margin_brings_marker_into_range() {
        // 150px below the viewport bottom
        let marker = Rect::new(0.0, 750.0, 800.0, 10.0);
        let options = SentinelOptions::default();
        assert!(options.is_visible(marker, viewport()));
        assert!(!SentinelOptions {
            root_margin: 0.0,
            ..options
        }
        .is_visible(marker, viewport()));
    }

    #[test]
    fn test_zero_height_marker_counts_as_full_ratio() {
        let marker = Rect::new(0.0, 799.0, 800.0, 0.0);
        assert_eq!(intersection_ratio(marker, viewport(), 200.0), Some(1.0));
    }

    #[test]
    fn test_zero_height_marker_on_edge_intersects() {
        let marker = Rect::new(0.0, 800.0, 800.0, 0.0);
        assert_eq!(intersection_ratio(marker, viewport(), 200.0), Some(1.0));
    }

    #[test]
    fn test_threshold_requires_enough_overlap() {
        // 100px tall marker with only 5px inside the grown viewport
        let marker = Rect::new(0.0, 795.0, 800.0, 100.0);
        let options = SentinelOptions::default();
        let ratio = intersection_ratio(marker, viewport(), options.root_margin).unwrap();
        assert!((ratio - 0.05).abs() < 1e-9);
        assert!(!options.is_visible(marker, viewport()));

        let marker = Rect::new(0.0, 780.0, 800.0, 100.0);
        assert!(options.is_visible(marker, viewport()));
    }

    #[test]
    fn test_negative_dimensions_are_clamped() {
        let rect = Rect::new(10.0, 10.0, -5.0, -5.0);
        assert_eq!(rect.area(), 0.0);
    }

    #[test]
    fn test_tracker_fires_on_crossing_only() {
        let mut tracker = SentinelTracker::new();
        assert!(!tracker.observe(false));
        assert!(tracker.observe(true));
        assert!(!tracker.observe(true));
        assert!(!tracker.observe(false));
        assert!(tracker.observe(true));
    }

    #[test]
    fn test_tracker_rearm_allows_refire() {
        let mut tracker = SentinelTracker::new();
        assert!(tracker.observe(true));
        tracker.rearm();
        assert!(tracker.observe(true));
    }
}
