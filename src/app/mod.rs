//! Application orchestration: state management, event loop, and input handling.

pub mod event;
pub mod gallery;
pub mod handler;
pub mod state;
