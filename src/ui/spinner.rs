//! Tracker activity indicator: a small spinner + phase label rendered in the
//! top-right corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use gallery_scroll::core::tracker::TrackerPhase;

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shows what the viewport tracker is busy with.  Invisible while idle.
pub struct PhaseIndicator {
    pub phase: TrackerPhase,
    /// True while a scroll animation is running, whatever the phase.
    pub animating: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl PhaseIndicator {
    fn label(&self) -> Option<&'static str> {
        match (self.phase, self.animating) {
            (TrackerPhase::Correcting, _) => Some("following"),
            (TrackerPhase::Auditing, _) => Some("re-centring"),
            (TrackerPhase::Idle, true) => Some("scrolling"),
            (TrackerPhase::Idle, false) => None,
        }
    }
}

impl Widget for PhaseIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(text) = self.label() else {
            return;
        };
        if area.width < 18 || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} {text} ");

        let label_width = label.chars().count() as u16;
        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let line = Line::from(Span::styled(label, Theme::indicator_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}
