//! Seams to the host's layout: the scrollable container, the per-item
//! geometry lookup, and container resize notifications.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::geometry::{Rect, ScrollBounds};

/// The scrollable viewport holding the item grid.
///
/// Setters take `&self` because the container is shared between the host
/// (which renders it) and the animator (the only writer of the offset).
pub trait ScrollContainer {
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&self, y: f64);
    /// Total content height.
    fn scroll_height(&self) -> f64;
    /// Visible height.
    fn client_height(&self) -> f64;
    /// On-screen rectangle of the visible area.
    fn rect(&self) -> Rect;

    fn bounds(&self) -> ScrollBounds {
        ScrollBounds::from_heights(self.scroll_height(), self.client_height())
    }
}

/// Index → geometry lookup supplied by the layout collaborator.
pub trait ItemLayout {
    /// The container, if it is currently laid out.
    fn container(&self) -> Option<Rc<dyn ScrollContainer>>;
    /// On-screen rectangle of the item at `index`, if it exists.
    fn item_rect(&self, index: usize) -> Option<Rect>;
}

/// Subscription id returned by [`ResizeObserver::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Source of container resize notifications.
pub trait ResizeObserver {
    fn observe(&self, callback: Box<dyn FnMut()>) -> ObserverId;
    fn disconnect(&self, id: ObserverId);
}

type Listener = Rc<RefCell<Box<dyn FnMut()>>>;

/// Resize observer the host drives by calling [`notify`](Self::notify)
/// whenever the container's size changes.
#[derive(Default)]
pub struct ResizeNotifier {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ObserverId, Listener)>>,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every connected listener.  Listeners may connect or disconnect
    /// observers while being notified.
    pub fn notify(&self) {
        let snapshot: Vec<(ObserverId, Listener)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            let still_connected = self.listeners.borrow().iter().any(|(i, _)| *i == id);
            if still_connected {
                let mut callback = listener.borrow_mut();
                (*callback)();
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ResizeObserver for ResizeNotifier {
    fn observe(&self, callback: Box<dyn FnMut()>) -> ObserverId {
        let id = ObserverId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn disconnect(&self, id: ObserverId) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }
}
