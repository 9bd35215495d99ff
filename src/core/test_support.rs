//! Geometry and selection fakes shared by the engine's unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::geometry::Rect;
use super::selection::{GalleryData, Selection};
use super::viewport::{ItemLayout, ScrollContainer};

/// Container at screen top 0 that records every offset write.
pub struct TestContainer {
    pub scroll_top: Cell<f64>,
    pub client_height: Cell<f64>,
    pub scroll_height: Cell<f64>,
    pub writes: RefCell<Vec<f64>>,
}

impl TestContainer {
    pub fn new(client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top: Cell::new(0.0),
            client_height: Cell::new(client_height),
            scroll_height: Cell::new(scroll_height),
            writes: RefCell::new(Vec::new()),
        }
    }
}

impl ScrollContainer for TestContainer {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn set_scroll_top(&self, y: f64) {
        self.writes.borrow_mut().push(y);
        self.scroll_top.set(y);
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height.get()
    }

    fn client_height(&self) -> f64 {
        self.client_height.get()
    }

    fn rect(&self) -> Rect {
        Rect::new(0.0, self.client_height.get())
    }
}

/// Single-column list of `row_height` items laid out in a [`TestContainer`].
pub struct TestLayout {
    pub container: Rc<TestContainer>,
    pub row_height: f64,
    pub item_count: Cell<usize>,
    /// When set, every item reports this rect regardless of scroll.
    pub pinned: Cell<Option<Rect>>,
}

impl TestLayout {
    pub fn new(client_height: f64, row_height: f64, item_count: usize) -> Self {
        let content = row_height * item_count as f64;
        Self {
            container: Rc::new(TestContainer::new(client_height, content)),
            row_height,
            item_count: Cell::new(item_count),
            pinned: Cell::new(None),
        }
    }
}

impl ItemLayout for TestLayout {
    fn container(&self) -> Option<Rc<dyn ScrollContainer>> {
        Some(self.container.clone())
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.item_count.get() {
            return None;
        }
        if let Some(rect) = self.pinned.get() {
            return Some(rect);
        }
        let top = index as f64 * self.row_height - self.container.scroll_top.get();
        Some(Rect::new(top, self.row_height))
    }
}

/// In-memory selection that logs every `select` call.
pub struct TestGallery {
    pub selected: Cell<Option<usize>>,
    pub item_count: usize,
    pub path: String,
    pub calls: RefCell<Vec<Option<usize>>>,
}

impl TestGallery {
    pub fn new(item_count: usize, selected: Option<usize>) -> Self {
        Self {
            selected: Cell::new(selected),
            item_count,
            path: String::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }
}

impl Selection for TestGallery {
    fn selected(&self) -> Option<usize> {
        self.selected.get()
    }

    fn select(&self, index: Option<usize>) -> bool {
        self.calls.borrow_mut().push(index);
        self.selected.set(index);
        true
    }

    fn data(&self) -> Option<GalleryData> {
        Some(GalleryData {
            item_count: self.item_count,
            path: self.path.clone(),
        })
    }
}
