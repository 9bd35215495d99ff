//! Central application state.
//!
//! Owns the gallery, its grid layout and the viewport tracker, all driven by
//! one [`ManualScheduler`] that the event loop advances to wall-clock time.

use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;

use gallery_scroll::config::AppConfig;
use gallery_scroll::core::geometry::Rect as ViewRect;
use gallery_scroll::core::grid::UniformGrid;
use gallery_scroll::core::scheduler::ManualScheduler;
use gallery_scroll::core::selection::Selection;
use gallery_scroll::core::tracker::ViewportTracker;
use gallery_scroll::core::viewport::ResizeNotifier;

use super::gallery::Gallery;
use crate::ui::layout::AppLayout;

/// Top-level application state.
pub struct AppState {
    pub gallery: Rc<Gallery>,
    pub grid: Rc<UniformGrid>,
    pub scheduler: Rc<ManualScheduler>,
    pub resize: Rc<ResizeNotifier>,
    pub tracker: ViewportTracker,
    pub config: AppConfig,
    /// Last known terminal size; the grid viewport is derived from it.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frames drawn so far (drives the activity spinner).
    pub frame_count: u64,
    started: Instant,
}

impl AppState {
    pub fn new(gallery: Gallery, config: AppConfig) -> Self {
        let gallery = Rc::new(gallery);
        let grid = Rc::new(UniformGrid::new(1, f64::from(config.cell_height)));
        grid.set_item_count(gallery.len());
        let scheduler = Rc::new(ManualScheduler::new());
        let resize = Rc::new(ResizeNotifier::new());

        let tracker = ViewportTracker::new(
            scheduler.clone(),
            gallery.clone(),
            grid.clone(),
            resize.clone(),
            config.timings(),
        );
        tracker.mount();

        Self {
            gallery,
            grid,
            scheduler,
            resize,
            tracker,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            frame_count: 0,
            started: Instant::now(),
        }
    }

    /// Run every timer and frame callback that is due by now.
    pub fn tick(&mut self) {
        self.scheduler.advance_to(self.started.elapsed());
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    /// Lay the grid out for a new terminal size and tell the tracker.
    pub fn set_terminal_area(&mut self, area: Rect) {
        if area == self.terminal_area {
            return;
        }
        self.terminal_area = area;

        let inner = AppLayout::from_area(area).grid_inner();
        let columns = (inner.width / self.config.cell_width.max(1)).max(1);
        self.grid
            .set_viewport(ViewRect::new(f64::from(inner.y), f64::from(inner.height)));
        self.grid.set_columns(usize::from(columns));
        tracing::debug!(columns, rows = inner.height, "grid relaid out");
        self.resize.notify();
    }

    /// Select `index` and let the tracker follow it.
    pub fn select(&mut self, index: Option<usize>) {
        if self.gallery.selected() == index {
            return;
        }
        if self.gallery.select(index) {
            self.status_message = None;
            self.tracker.on_selection_changed();
        }
    }

    /// Open the selected item if it is a directory.
    pub fn open_selected(&mut self) {
        let Some(dir) = self.gallery.dir() else {
            return;
        };
        let Some(item) = self.gallery.selected().and_then(|i| self.gallery.item(i)) else {
            return;
        };
        if item.is_dir {
            self.open_dir(&dir.join(&item.name));
        }
    }

    /// Move up to the parent listing with the directory we came from
    /// selected.
    pub fn open_parent(&mut self) {
        let Some(parent) = self.gallery.parent_dir() else {
            self.status_message = Some("Already at the top".to_string());
            return;
        };
        let came_from = self
            .gallery
            .dir()
            .and_then(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()));
        if !self.open_dir(&parent) {
            return;
        }
        let index = came_from.and_then(|name| {
            self.gallery
                .with_items(|items| items.iter().position(|item| item.name == name))
        });
        if index.is_some() {
            self.select(index);
        }
    }

    /// Replace the listing.  Returns `false` (and keeps the old one) if `dir`
    /// cannot be read.
    fn open_dir(&mut self, dir: &Path) -> bool {
        if let Err(err) = self.gallery.navigate(dir) {
            tracing::warn!("{err:#}");
            self.status_message = Some(format!("{err:#}"));
            return false;
        }
        // A new listing starts from the top with nothing in flight.
        self.tracker.animator().cleanup();
        self.grid.replace_items(self.gallery.len());
        self.status_message = Some(format!("Opened {}", dir.display()));
        self.tracker.on_selection_changed();
        true
    }

    /// Bottom bar text: the status message, or the key hints.
    pub fn status_line(&self) -> String {
        if let Some(message) = &self.status_message {
            return message.clone();
        }
        let position = match self.gallery.selected() {
            Some(i) => format!("{}/{}", i + 1, self.gallery.len()),
            None => format!("-/{}", self.gallery.len()),
        };
        format!(
            " {position}  arrows/hjkl move · wheel steps · enter open · backspace up · c centre · q quit"
        )
    }
}
