//! Viewport geometry helpers.
//!
//! Rectangles are in viewport coordinates, as returned by
//! `getBoundingClientRect`: `top` is measured from the top edge of the
//! visible area and becomes negative once the element scrolls past it.

/// Vertical extent of an element relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Rect of an element `height` tall whose top edge sits at `top`.
    #[must_use]
    pub fn with_height(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Same rect seen after scrolling the document by `dy`.
    #[must_use]
    pub fn scrolled_by(&self, dy: f64) -> Self {
        Self {
            top: self.top - dy,
            bottom: self.bottom - dy,
        }
    }
}

/// Scroll position and size of the visible area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }
}

/// Distance of the element's top edge from the document origin.
///
/// Independent of the current scroll position.
#[must_use]
pub fn offset_top(rect: Rect, viewport: Viewport) -> f64 {
    rect.top + viewport.scroll_y
}

/// Whether the element overlaps the viewport by at least `threshold`.
///
/// The element's top must be at or above `height * (1 - threshold)` and its
/// bottom at or below `height * threshold`. Both comparisons are inclusive.
#[must_use]
pub fn is_in_viewport(rect: Rect, viewport: Viewport, threshold: f64) -> bool {
    rect.top <= viewport.height * (1.0 - threshold) && rect.bottom >= viewport.height * threshold
}
