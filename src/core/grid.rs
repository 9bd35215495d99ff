//! Uniform grid layout: equal cells, `columns` per row.
//!
//! Supplies both collaborator seams the tracker needs (the scrollable
//! container and the index → rectangle lookup) for grids whose geometry is
//! fully determined by cell size and item count.

use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

use super::geometry::Rect;
use super::viewport::{ItemLayout, ScrollContainer};

/// Scrollable viewport of a [`UniformGrid`].
#[derive(Debug, Default)]
pub struct GridContainer {
    viewport: Cell<Rect>,
    scroll_top: Cell<f64>,
    content_height: Cell<f64>,
}

impl ScrollContainer for GridContainer {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn set_scroll_top(&self, y: f64) {
        self.scroll_top.set(y);
    }

    fn scroll_height(&self) -> f64 {
        self.content_height.get()
    }

    fn client_height(&self) -> f64 {
        self.viewport.get().height
    }

    fn rect(&self) -> Rect {
        self.viewport.get()
    }
}

#[derive(Debug)]
pub struct UniformGrid {
    container: Rc<GridContainer>,
    columns: Cell<usize>,
    row_height: f64,
    item_count: Cell<usize>,
}

impl UniformGrid {
    pub fn new(columns: usize, row_height: f64) -> Self {
        Self {
            container: Rc::new(GridContainer::default()),
            columns: Cell::new(columns.max(1)),
            row_height: row_height.max(1.0),
            item_count: Cell::new(0),
        }
    }

    pub fn grid_container(&self) -> Rc<GridContainer> {
        Rc::clone(&self.container)
    }

    pub fn columns(&self) -> usize {
        self.columns.get()
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn item_count(&self) -> usize {
        self.item_count.get()
    }

    pub fn rows(&self) -> usize {
        self.item_count.get().div_ceil(self.columns.get())
    }

    pub fn scroll_top(&self) -> f64 {
        self.container.scroll_top.get()
    }

    pub fn viewport(&self) -> Rect {
        self.container.viewport.get()
    }

    /// Move or resize the on-screen viewport.
    pub fn set_viewport(&self, viewport: Rect) {
        self.container.viewport.set(viewport);
        self.relayout();
    }

    pub fn set_columns(&self, columns: usize) {
        self.columns.set(columns.max(1));
        self.relayout();
    }

    pub fn set_item_count(&self, count: usize) {
        self.item_count.set(count);
        self.relayout();
    }

    /// Swap in a different listing of `count` items.  The new content is
    /// laid out from the top.
    pub fn replace_items(&self, count: usize) {
        self.container.scroll_top.set(0.0);
        self.set_item_count(count);
    }

    /// Rows intersecting the viewport at the current scroll offset.
    pub fn visible_rows(&self) -> Range<usize> {
        let top = self.scroll_top().max(0.0);
        let first = (top / self.row_height).floor() as usize;
        let last = ((top + self.viewport().height) / self.row_height).ceil() as usize;
        first.min(self.rows())..last.min(self.rows())
    }

    /// Item under the on-screen point (`y`, `column`).
    pub fn index_at(&self, y: f64, column: usize) -> Option<usize> {
        let viewport = self.viewport();
        if column >= self.columns.get() || y < viewport.top || y >= viewport.bottom() {
            return None;
        }
        let content_y = y - viewport.top + self.scroll_top();
        let row = (content_y / self.row_height).floor() as usize;
        let index = row * self.columns.get() + column;
        (index < self.item_count.get()).then_some(index)
    }

    /// Content height follows the item count; a shrinking grid pulls the
    /// offset back into range the way a browser's layout does.
    fn relayout(&self) {
        let content = self.rows() as f64 * self.row_height;
        self.container.content_height.set(content);
        let clamped = self.container.bounds().clamp(self.scroll_top());
        if clamped != self.scroll_top() {
            self.container.scroll_top.set(clamped);
        }
    }
}

impl ItemLayout for UniformGrid {
    fn container(&self) -> Option<Rc<dyn ScrollContainer>> {
        Some(self.container.clone())
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.item_count.get() {
            return None;
        }
        let row = index / self.columns.get();
        let top = self.viewport().top + row as f64 * self.row_height - self.scroll_top();
        Some(Rect::new(top, self.row_height))
    }
}
