//! Core engine: scheduling, geometry, scroll animation, viewport tracking
//! and wheel navigation.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All of it
//! runs on a single UI thread: shared state is `Rc`/`Cell`/`RefCell`, and
//! deferred work goes through an injected [`scheduler::Scheduler`].

pub mod animator;
pub mod geometry;
pub mod grid;
pub mod scheduler;
pub mod selection;
pub mod tracker;
pub mod viewport;
pub mod wheel;

#[cfg(test)]
pub(crate) mod test_support;
