//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use gallery_scroll::core::selection::Selection;
use gallery_scroll::core::viewport::ScrollContainer;
use gallery_scroll::core::wheel::{WheelEvent, WheelModifiers, WheelOutcome};

use super::state::AppState;
use crate::ui::layout::AppLayout;

/// Fraction of the viewport a wheel tick scrolls by when it does not move
/// the selection.
const NATIVE_SCROLL_FRACTION: f64 = 0.25;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let columns = state.grid.columns() as isize;
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => move_by(state, -1),
        KeyCode::Right | KeyCode::Char('l') => move_by(state, 1),
        KeyCode::Up | KeyCode::Char('k') => move_by(state, -columns),
        KeyCode::Down | KeyCode::Char('j') => move_by(state, columns),
        KeyCode::PageUp => move_by(state, -columns * page_rows(state)),
        KeyCode::PageDown => move_by(state, columns * page_rows(state)),
        KeyCode::Home => {
            if state.gallery.len() > 0 {
                state.select(Some(0));
            }
        }
        KeyCode::End => {
            if let Some(last) = state.gallery.len().checked_sub(1) {
                state.select(Some(last));
            }
        }
        KeyCode::Enter => state.open_selected(),
        KeyCode::Backspace => state.open_parent(),
        KeyCode::Esc => state.select(None),
        KeyCode::Char('c') => state.tracker.scroll_to_selected(true),
        _ => {}
    }
}

/// Move the selection by `delta` cells, clamped to the listing.  With nothing
/// selected, any move starts at the first item.
fn move_by(state: &mut AppState, delta: isize) {
    let Some(last) = state.gallery.len().checked_sub(1) else {
        return;
    };
    let target = match state.gallery.selected() {
        Some(i) => (i as isize + delta).clamp(0, last as isize) as usize,
        None => 0,
    };
    state.select(Some(target));
}

/// Whole rows that fit in the viewport.
fn page_rows(state: &AppState) -> isize {
    let rows = state.grid.viewport().height / state.grid.row_height();
    (rows.floor() as isize).max(1)
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let inner = AppLayout::from_area(state.terminal_area).grid_inner();

    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let direction = if mouse.kind == MouseEventKind::ScrollDown {
                1.0
            } else {
                -1.0
            };
            // Terminals only report whole wheel notches.
            let event = WheelEvent {
                modifiers: wheel_modifiers(mouse.modifiers),
                ..WheelEvent::lines(direction)
            };
            match state.tracker.on_wheel(&event) {
                WheelOutcome::PassThrough => native_scroll(state, direction),
                WheelOutcome::Consumed { moved: true } => after_wheel_move(state),
                // The selection could not move: nudge the grid instead.
                WheelOutcome::Consumed { moved: false } => {
                    if !state.tracker.animator().is_active() {
                        native_scroll(state, direction);
                    }
                }
            }
        }
        // Sideways scrolling in a terminal comes from touchpads.
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            let delta_x = if mouse.kind == MouseEventKind::ScrollRight {
                1.0
            } else {
                -1.0
            };
            let event = WheelEvent {
                modifiers: wheel_modifiers(mouse.modifiers),
                ..WheelEvent::swipe(delta_x)
            };
            if state.tracker.on_wheel(&event) == (WheelOutcome::Consumed { moved: true }) {
                after_wheel_move(state);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if !point_in_rect(inner, mouse.column, mouse.row) {
                return;
            }
            let column = (mouse.column - inner.x) / state.config.cell_width.max(1);
            if let Some(index) = state
                .grid
                .index_at(f64::from(mouse.row), usize::from(column))
            {
                state.select(Some(index));
            }
        }
        _ => {}
    }
}

fn after_wheel_move(state: &mut AppState) {
    if state.gallery.selected().is_none() {
        // Stepped back past the first item: leave for the parent.
        state.open_parent();
    } else {
        state.status_message = None;
    }
}

/// Scroll the grid itself, continuing from wherever a running animation is
/// headed.
fn native_scroll(state: &mut AppState, direction: f64) {
    let container = state.grid.grid_container();
    let step = container.client_height() * NATIVE_SCROLL_FRACTION;
    let from = state
        .tracker
        .animator()
        .target()
        .unwrap_or_else(|| container.scroll_top());
    state.tracker.smooth_scroll(from + direction * step.max(1.0), true);
}

fn wheel_modifiers(modifiers: KeyModifiers) -> WheelModifiers {
    WheelModifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gallery::Gallery;
    use gallery_scroll::config::AppConfig;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn state(count: usize) -> AppState {
        let mut state = AppState::new(Gallery::synthetic(count), AppConfig::default());
        state.set_terminal_area(Rect::new(0, 0, 80, 24));
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers,
        }
    }

    #[test]
    fn arrows_move_within_the_grid() {
        let mut state = state(10);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.gallery.selected(), Some(3));
        handle_key(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.gallery.selected(), Some(4));
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.gallery.selected(), Some(9));
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.gallery.selected(), Some(9));
        handle_key(&mut state, key(KeyCode::Home));
        assert_eq!(state.gallery.selected(), Some(0));
    }

    #[test]
    fn escape_clears_and_any_move_reenters() {
        let mut state = state(10);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.gallery.selected(), None);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.gallery.selected(), Some(0));
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut by_ctrl_c = state(1);
        handle_key(&mut by_ctrl_c, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(by_ctrl_c.should_quit);

        let mut by_q = state(1);
        handle_key(&mut by_q, key(KeyCode::Char('q')));
        assert!(by_q.should_quit);
    }

    #[test]
    fn wheel_notch_steps_the_selection() {
        let mut state = state(10);
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, 5, 5, KeyModifiers::NONE),
        );
        assert_eq!(state.gallery.selected(), Some(1));
    }

    #[test]
    fn sideways_scroll_steps_through_items() {
        let mut state = state(10);
        state.select(Some(4));
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollLeft, 5, 5, KeyModifiers::NONE),
        );
        assert_eq!(state.gallery.selected(), Some(5));
        // The swipe is followed on the next frame.
        assert_eq!(state.scheduler.pending_frames(), 1);
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollRight, 5, 5, KeyModifiers::NONE),
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollRight, 5, 5, KeyModifiers::NONE),
        );
        assert_eq!(state.gallery.selected(), Some(3));
    }

    #[test]
    fn modified_wheel_scrolls_the_grid_instead() {
        let mut state = state(60);
        // Nothing selected, so no correction competes with the scroll.
        handle_key(&mut state, key(KeyCode::Esc));
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, 5, 5, KeyModifiers::SHIFT),
        );
        assert_eq!(state.gallery.selected(), None);
        // A quarter of the 21-row viewport.
        assert_eq!(state.tracker.animator().target(), Some(5.25));
        state.scheduler.advance(Duration::from_millis(250));
        assert_eq!(state.grid.scroll_top(), 5.25);
    }

    #[test]
    fn blocked_wheel_nudges_the_grid() {
        let mut state = state(60);
        handle_key(&mut state, key(KeyCode::Esc));
        state.grid.grid_container().set_scroll_top(20.0);
        // Nothing selected: a backward tick cannot move the selection.
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollUp, 5, 5, KeyModifiers::NONE),
        );
        assert_eq!(state.gallery.selected(), None);
        assert_eq!(state.tracker.animator().target(), Some(14.75));
    }

    #[test]
    fn click_selects_the_cell_under_the_pointer() {
        let mut state = state(10);
        // Second column, second row: cells are 22 wide and 4 high from (1, 1).
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), 30, 6, KeyModifiers::NONE),
        );
        assert_eq!(state.gallery.selected(), Some(4));
    }
}
