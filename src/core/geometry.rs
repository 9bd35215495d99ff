//! Vertical geometry shared by the animator and the tracker.
//!
//! Only the vertical axis matters for keeping an item in view, so rectangles
//! carry just `top` and `height`, in the host's on-screen units.

/// Fraction of the container height kept clear at top and bottom.
pub const VISIBILITY_MARGIN: f64 = 0.15;

/// On-screen vertical extent of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Valid range for a container's scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollBounds {
    pub min: f64,
    pub max: f64,
}

impl ScrollBounds {
    /// Bounds for content of `scroll_height` shown through `client_height`.
    /// Content that fits yields `{0, 0}`.
    pub fn from_heights(scroll_height: f64, client_height: f64) -> Self {
        Self {
            min: 0.0,
            max: (scroll_height - client_height).max(0.0),
        }
    }

    pub fn clamp(&self, y: f64) -> f64 {
        if y.is_nan() {
            return self.min;
        }
        y.clamp(self.min, self.max)
    }
}

/// `true` when `item` sits inside the margin band of `container`, allowing
/// half the item's height as slack on either side.
pub fn is_comfortably_visible(item: Rect, container: Rect) -> bool {
    let margin = container.height * VISIBILITY_MARGIN;
    let slack = item.height / 2.0;
    let visible_top = container.top + margin;
    let visible_bottom = container.bottom() - margin;
    item.top >= visible_top - slack && item.bottom() <= visible_bottom + slack
}

/// `true` when any edge of `item` crosses the strict container bounds.
pub fn is_outside(item: Rect, container: Rect) -> bool {
    item.top < container.top || item.bottom() > container.bottom()
}

/// Scroll offset that centres `item` in `container`.
pub fn centering_target(scroll_top: f64, item: Rect, container: Rect) -> f64 {
    scroll_top + (item.top - container.top) - container.height / 2.0 + item.height / 2.0
}
