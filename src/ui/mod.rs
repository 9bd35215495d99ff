//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer draws the gallery grid at whatever offset the tracker's
//! animator has reached.  No filesystem I/O happens here.

pub mod grid_widget;
pub mod layout;
pub mod spinner;
pub mod theme;
