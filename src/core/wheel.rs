//! Wheel-driven selection navigation.
//!
//! Wheel input is turned into single-step moves of the selection index.
//! Touchpads report a stream of small pixel deltas, mouse wheels report
//! coarse ticks; [`classify`] tells them apart and [`WheelNavigator`]
//! accumulates vertical touchpad deltas until they are worth one step.
//! Horizontal touchpad swipes step once per event.

use std::time::Duration;

use super::selection::Selection;

/// Touchpad events report `|delta_y|` below this many pixels.
pub const TOUCHPAD_MAX_DELTA: f64 = 50.0;
/// Raw touchpad deltas above this are scaled by [`FAST_SCALE`].
pub const FAST_DELTA: f64 = 30.0;
pub const FAST_SCALE: f64 = 0.75;
pub const SLOW_SCALE: f64 = 0.5;
/// Accumulated magnitude needed for one step after a quick tick.
pub const FAST_THRESHOLD: f64 = 25.0;
/// Accumulated magnitude needed for one step otherwise.
pub const SLOW_THRESHOLD: f64 = 35.0;
/// A tick arriving within this window of the previous one is "fast".
pub const FAST_TICK_WINDOW: Duration = Duration::from_millis(50);

/// Unit of the event's deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Modifier keys held during the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl WheelModifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// Raw wheel input as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub modifiers: WheelModifiers,
}

impl WheelEvent {
    pub fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            ..Self::default()
        }
    }

    pub fn lines(delta_y: f64) -> Self {
        Self {
            delta_y,
            delta_mode: DeltaMode::Line,
            ..Self::default()
        }
    }

    /// Sideways pixel scroll.
    pub fn swipe(delta_x: f64) -> Self {
        Self {
            delta_x,
            ..Self::default()
        }
    }

    fn is_horizontal(&self) -> bool {
        self.delta_x.abs() > self.delta_y.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    Touchpad,
    Wheel,
}

/// Small pixel-granular deltas come from a touchpad; anything else is a
/// discrete wheel tick.
pub fn classify(event: &WheelEvent) -> InputDevice {
    if event.delta_y.abs() < TOUCHPAD_MAX_DELTA && event.delta_mode == DeltaMode::Pixel {
        InputDevice::Touchpad
    } else {
        InputDevice::Wheel
    }
}

/// What the host should do with the event after navigation saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not ours; let the host's default scrolling run.
    PassThrough,
    /// Default scrolling must be suppressed.  `moved` is true when the
    /// selection changed.
    Consumed { moved: bool },
}

/// Running sum of unconsumed touchpad delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelAccumulator {
    pub touchpad_delta: f64,
}

/// Touchpad/wheel navigation state machine.
#[derive(Debug, Default)]
pub struct WheelNavigator {
    accumulator: WheelAccumulator,
    last_event_at: Option<Duration>,
}

impl WheelNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulator.touchpad_delta
    }

    /// Feed one event received at `now`.
    pub fn handle(
        &mut self,
        event: &WheelEvent,
        now: Duration,
        selection: &dyn Selection,
    ) -> WheelOutcome {
        if event.modifiers.any() {
            return WheelOutcome::PassThrough;
        }

        let fast = self
            .last_event_at
            .is_some_and(|last| now.saturating_sub(last) < FAST_TICK_WINDOW);
        self.last_event_at = Some(now);

        let moved = match classify(event) {
            InputDevice::Touchpad if event.is_horizontal() => {
                self.accumulator.touchpad_delta = 0.0;
                // Swiping right goes back.
                step_selection(selection, -event.delta_x)
            }
            InputDevice::Touchpad => {
                let dy = event.delta_y;
                let scale = if dy.abs() > FAST_DELTA { FAST_SCALE } else { SLOW_SCALE };
                self.accumulator.touchpad_delta += dy * scale;

                let threshold = if fast { FAST_THRESHOLD } else { SLOW_THRESHOLD };
                let acc = self.accumulator.touchpad_delta;
                if acc.abs() >= threshold {
                    self.accumulator.touchpad_delta = 0.0;
                    step_selection(selection, acc)
                } else {
                    false
                }
            }
            InputDevice::Wheel => {
                // Switching devices abandons any partial touchpad gesture.
                self.accumulator.touchpad_delta = 0.0;
                step_selection(selection, event.delta_y)
            }
        };

        if moved {
            tracing::debug!(selected = ?selection.selected(), "wheel moved selection");
        }
        WheelOutcome::Consumed { moved }
    }
}

/// Move the selection one step in the direction of `delta`.
///
/// Forward stops at the last item.  Backward stops at the first item, unless
/// the listing has a parent, in which case the selection is cleared.
fn step_selection(selection: &dyn Selection, delta: f64) -> bool {
    if delta == 0.0 || delta.is_nan() {
        return false;
    }
    let Some(data) = selection.data() else {
        return false;
    };

    match (selection.selected(), delta > 0.0) {
        (Some(i), true) if i + 1 < data.item_count => selection.select(Some(i + 1)),
        (Some(i), false) if i > 0 => selection.select(Some(i - 1)),
        (Some(0), false) if data.has_parent() => selection.select(None),
        (None, true) if data.item_count > 0 => selection.select(Some(0)),
        _ => false,
    }
}
