//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Primary screen layout with the bordered grid pane and a bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub grid_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // grid pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            grid_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// The grid pane inside its border: where cells are drawn.
    pub fn grid_inner(&self) -> Rect {
        self.grid_area.inner(Margin::new(1, 1))
    }
}
