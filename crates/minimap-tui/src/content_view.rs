//! The primary scrollable view: whole text lines, no wrapping.

use std::sync::Arc;

use minimap_core::{ContainerMetrics, Document, ScrollContainer};

/// Scroll state of the content pane, measured in lines
#[derive(Debug, Clone)]
pub struct ContentView {
    document: Arc<Document>,
    scroll_top: usize,
    viewport_height: u16,
}

impl ContentView {
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            scroll_top: 0,
            viewport_height: 0,
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Swap in new content, keeping the scroll position where possible
    pub fn set_document(&mut self, document: Arc<Document>) {
        self.document = document;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    #[inline]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    #[inline]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn max_scroll_top(&self) -> usize {
        self.document
            .line_count()
            .saturating_sub(self.viewport_height as usize)
    }

    /// Scroll by `delta` lines (positive = down)
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (self.scroll_top as i64).saturating_add(delta);
        self.scroll_top = target.clamp(0, self.max_scroll_top() as i64) as usize;
    }

    pub fn half_page(&self) -> i64 {
        (self.viewport_height / 2).max(1) as i64
    }

    pub fn page(&self) -> i64 {
        self.viewport_height.max(1) as i64
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }

    /// Lines currently inside the viewport
    pub fn visible_lines(&self) -> &[String] {
        self.document
            .window(self.scroll_top, self.viewport_height as usize)
    }

    /// Percentage through the document, for the status bar
    pub fn percent(&self) -> u16 {
        let max = self.max_scroll_top();
        if max == 0 {
            return 100;
        }
        ((self.scroll_top * 100) / max) as u16
    }
}

impl ScrollContainer for ContentView {
    fn metrics(&self) -> ContainerMetrics {
        ContainerMetrics::new(
            self.scroll_top as f64,
            self.document.line_count() as f64,
            self.viewport_height as f64,
        )
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        let max = self.max_scroll_top();
        self.scroll_top = if scroll_top.is_finite() && scroll_top > 0.0 {
            (scroll_top.round() as usize).min(max)
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(lines: usize, height: u16) -> ContentView {
        let text: String = (0..lines).map(|i| format!("line {}\n", i)).collect();
        let mut view = ContentView::new(Arc::new(Document::from_text(&text)));
        view.set_viewport_height(height);
        view
    }

    #[test]
    fn test_metrics() {
        let mut v = view(100, 20);
        v.scroll_by(30);
        assert_eq!(v.metrics(), ContainerMetrics::new(30.0, 100.0, 20.0));
    }

    #[test]
    fn test_scroll_clamped() {
        let mut v = view(100, 20);
        v.scroll_by(1000);
        assert_eq!(v.scroll_top(), 80);
        v.scroll_by(-1000);
        assert_eq!(v.scroll_top(), 0);
    }

    #[test]
    fn test_set_scroll_top_rounds_and_clamps() {
        let mut v = view(100, 20);
        v.set_scroll_top(41.6);
        assert_eq!(v.scroll_top(), 42);
        v.set_scroll_top(500.0);
        assert_eq!(v.scroll_top(), 80);
        v.set_scroll_top(-3.0);
        assert_eq!(v.scroll_top(), 0);
        v.set_scroll_top(f64::NAN);
        assert_eq!(v.scroll_top(), 0);
    }

    #[test]
    fn test_short_document_does_not_scroll() {
        let mut v = view(5, 20);
        v.scroll_by(3);
        assert_eq!(v.scroll_top(), 0);
        assert_eq!(v.percent(), 100);
        assert_eq!(v.visible_lines().len(), 5);
    }

    #[test]
    fn test_shrinking_document_clamps_scroll() {
        let mut v = view(100, 20);
        v.scroll_to_bottom();
        v.set_document(Arc::new(Document::from_text("a\nb\nc\n")));
        assert_eq!(v.scroll_top(), 0);
    }

    #[test]
    fn test_pages() {
        let v = view(100, 21);
        assert_eq!(v.half_page(), 10);
        assert_eq!(v.page(), 21);
        let v = view(100, 1);
        assert_eq!(v.half_page(), 1);
    }

    #[test]
    fn test_visible_window() {
        let mut v = view(100, 3);
        v.scroll_by(10);
        let lines = v.visible_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "line 10");
    }
}
