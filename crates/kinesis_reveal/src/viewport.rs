//! Viewport math
//!
//! The viewport is a window of `height` pixels onto the document, starting at
//! `scroll_y`. An element's *visible fraction* measures how far its top edge
//! has risen above the viewport's bottom edge, in viewport heights.

use kinesis_core::Rect;

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Document offset of the viewport's top edge
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Largest scroll offset for a document of `content_height`
    pub fn max_scroll(&self, content_height: f32) -> f32 {
        (content_height - self.height).max(0.0)
    }

    /// Scroll to `scroll_y`, clamped to the document
    pub fn scroll_to(&mut self, scroll_y: f32, content_height: f32) {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll(content_height));
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// The viewport in document coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Bottom edge in document coordinates
    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }

    /// How far `bounds`' top edge has risen above the viewport's bottom edge,
    /// in viewport heights.
    ///
    /// 0.0 while the element is still below the fold, 1.0 once its top edge
    /// reaches the top of the viewport, and above 1.0 once it has scrolled
    /// past.
    pub fn visible_fraction(&self, bounds: Rect) -> f32 {
        if self.height <= 0.0 {
            return if bounds.y() <= self.scroll_y { 1.0 } else { 0.0 };
        }
        ((self.bottom() - bounds.y()) / self.height).max(0.0)
    }

    /// Whether any part of `bounds` is on screen
    pub fn intersects(&self, bounds: Rect) -> bool {
        bounds.y() < self.bottom() && bounds.bottom() > self.scroll_y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
