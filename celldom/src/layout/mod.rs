mod flex;
mod rect;

use std::collections::HashMap;

pub use flex::layout;
pub use rect::Rect;

/// Computed geometry for one frame.
///
/// Besides the rect of every element, scroll containers record the size of
/// their content and of the visible viewport so callers can clamp offsets.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
    content_sizes: HashMap<String, (u16, u16)>,
    viewport_sizes: HashMap<String, (u16, u16)>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.rects.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    /// Size of the scrollable content of a scroll container.
    pub fn content_size(&self, id: &str) -> Option<(u16, u16)> {
        self.content_sizes.get(id).copied()
    }

    /// Visible area of a scroll container, excluding scrollbar lines.
    pub fn viewport_size(&self, id: &str) -> Option<(u16, u16)> {
        self.viewport_sizes.get(id).copied()
    }

    /// Maximum horizontal offset for a scroll container.
    pub fn max_scroll_x(&self, id: &str) -> Option<u16> {
        let (content, _) = self.content_size(id)?;
        let (viewport, _) = self.viewport_size(id)?;
        Some(content.saturating_sub(viewport))
    }

    /// Maximum vertical offset for a scroll container.
    pub fn max_scroll_y(&self, id: &str) -> Option<u16> {
        let (_, content) = self.content_size(id)?;
        let (_, viewport) = self.viewport_size(id)?;
        Some(content.saturating_sub(viewport))
    }

    pub(crate) fn insert_scroll_sizes(&mut self, id: &str, content: (u16, u16), viewport: (u16, u16)) {
        self.content_sizes.insert(id.to_string(), content);
        self.viewport_sizes.insert(id.to_string(), viewport);
    }
}
