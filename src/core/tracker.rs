//! Keeps the selected item in view.
//!
//! The tracker decides *when* and *where* to scroll; the actual motion is
//! delegated to its [`ScrollAnimator`], which is the only writer of the
//! container's offset.  Corrections come from four places:
//!
//! * explicit [`ViewportTracker::scroll_to_selected`] calls,
//! * selection changes ([`ViewportTracker::on_selection_changed`], wheel moves),
//! * container resizes (debounced),
//! * a periodic audit that catches anything the others missed.
//!
//! All of them are serialised through [`TrackerPhase`]: a correction in
//! flight makes the audit and resize paths stand down instead of stacking a
//! second animation on top.
//!
//! An item taller than the viewport never counts as in view, so its
//! settle-check re-forces a correction every cycle and the tracker stays in
//! [`TrackerPhase::Correcting`].  Repeats are logged at `trace` level.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::animator::{ScrollAnimator, DEFAULT_DURATION};
use super::geometry::{centering_target, is_comfortably_visible, is_outside};
use super::scheduler::{FrameHandle, Scheduler, TimerHandle};
use super::selection::Selection;
use super::viewport::{ItemLayout, ObserverId, ResizeObserver};
use super::wheel::{WheelEvent, WheelNavigator, WheelOutcome};

// ───────────────────────────────────────── timings ───────────

/// Delays used by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerTimings {
    /// Length of one scroll animation.
    pub scroll_duration: Duration,
    /// Delay after dispatching a correction before re-verifying it.
    pub settle_delay: Duration,
    /// Period of the visibility audit.
    pub audit_period: Duration,
    /// How long an audit holds the [`TrackerPhase::Auditing`] phase.
    pub audit_release: Duration,
    /// Quiet time required after the last resize before correcting.
    pub resize_debounce: Duration,
}

impl Default for TrackerTimings {
    fn default() -> Self {
        Self {
            scroll_duration: DEFAULT_DURATION,
            settle_delay: Duration::from_millis(300),
            audit_period: Duration::from_millis(250),
            audit_release: Duration::from_millis(200),
            resize_debounce: Duration::from_millis(100),
        }
    }
}

/// Which kind of correction currently owns the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    #[default]
    Idle,
    /// An animated correction was dispatched and its settle-check is pending.
    Correcting,
    /// The audit found the selection out of view and queued a correction.
    Auditing,
}

// ───────────────────────────────────────── debounce ──────────

/// Runs a callback on the next frame, replacing any callback scheduled
/// earlier that has not fired yet.
pub struct DebouncedFrame {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

impl DebouncedFrame {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        self.cancel();
        let pending = Rc::clone(&self.pending);
        let handle = self.scheduler.request_frame(Box::new(move |_| {
            pending.set(None);
            callback();
        }));
        self.pending.set(Some(handle));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

// ───────────────────────────────────────── tracker ───────────

#[derive(Debug, Clone, Copy)]
struct AuditHandles {
    interval: TimerHandle,
    resize: ObserverId,
}

struct Inner {
    scheduler: Rc<dyn Scheduler>,
    selection: Rc<dyn Selection>,
    layout: Rc<dyn ItemLayout>,
    resize: Rc<dyn ResizeObserver>,
    animator: ScrollAnimator,
    timings: TrackerTimings,
    phase: Cell<TrackerPhase>,
    debounce: DebouncedFrame,
    audit: Cell<Option<AuditHandles>>,
    resize_timer: Cell<Option<TimerHandle>>,
    settle_timer: Cell<Option<TimerHandle>>,
    /// Consecutive settle-checks that found the item still out of view.
    settle_retries: Cell<u32>,
    release_timer: Cell<Option<TimerHandle>>,
    wheel: RefCell<WheelNavigator>,
    wheel_ready: Cell<bool>,
    torn_down: Cell<bool>,
}

/// Selection-visibility reconciliation plus wheel navigation.
pub struct ViewportTracker {
    inner: Rc<Inner>,
}

impl ViewportTracker {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        selection: Rc<dyn Selection>,
        layout: Rc<dyn ItemLayout>,
        resize: Rc<dyn ResizeObserver>,
        timings: TrackerTimings,
    ) -> Self {
        let animator = ScrollAnimator::new(Rc::clone(&scheduler), timings.scroll_duration);
        let debounce = DebouncedFrame::new(Rc::clone(&scheduler));
        Self {
            inner: Rc::new(Inner {
                scheduler,
                selection,
                layout,
                resize,
                animator,
                timings,
                phase: Cell::new(TrackerPhase::Idle),
                debounce,
                audit: Cell::new(None),
                resize_timer: Cell::new(None),
                settle_timer: Cell::new(None),
                settle_retries: Cell::new(0),
                release_timer: Cell::new(None),
                wheel: RefCell::new(WheelNavigator::new()),
                wheel_ready: Cell::new(false),
                torn_down: Cell::new(false),
            }),
        }
    }

    /// Bind the animator to the layout's container, start the audit and
    /// enable wheel navigation.
    pub fn mount(&self) {
        if let Some(container) = self.inner.layout.container() {
            self.inner.animator.init(container);
        }
        self.start_position_checking();
        self.setup_wheel_handler();
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.inner.animator
    }

    pub fn timings(&self) -> TrackerTimings {
        self.inner.timings
    }

    pub fn phase(&self) -> TrackerPhase {
        self.inner.phase.get()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.phase() == TrackerPhase::Correcting
    }

    pub fn is_checking_position(&self) -> bool {
        self.phase() == TrackerPhase::Auditing
    }

    /// Animate straight to `target_y`, bypassing selection logic.
    pub fn smooth_scroll(&self, target_y: f64, force: bool) {
        if self.inner.torn_down.get() {
            return;
        }
        self.inner.animator.smooth_scroll_to(target_y, force);
    }

    /// Bring the selected item into view if it needs it.  `force` skips the
    /// visibility checks and overrides an animation in flight.
    pub fn scroll_to_selected(&self, force: bool) {
        self.inner.scroll_to_selected(force);
    }

    /// Follow a selection change on the next frame.
    pub fn on_selection_changed(&self) {
        self.inner.on_selection_changed();
    }

    /// Start the resize observer and the periodic audit.  Later calls do
    /// nothing.
    pub fn start_position_checking(&self) {
        self.inner.start_position_checking();
    }

    /// Enable wheel navigation.  Later calls do nothing.
    pub fn setup_wheel_handler(&self) {
        if self.inner.torn_down.get() || self.inner.wheel_ready.replace(true) {
            return;
        }
        tracing::debug!("wheel navigation enabled");
    }

    /// Route a wheel event through navigation.  Until
    /// [`setup_wheel_handler`](Self::setup_wheel_handler) runs, every event
    /// passes through.
    pub fn on_wheel(&self, event: &WheelEvent) -> WheelOutcome {
        self.inner.on_wheel(event)
    }

    /// Cancel everything the tracker has scheduled.  The tracker stays inert
    /// afterwards.
    pub fn teardown(&self) {
        self.inner.teardown();
    }
}

impl Drop for ViewportTracker {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

impl Inner {
    fn scroll_to_selected(self: &Rc<Self>, force: bool) {
        if self.torn_down.get() {
            return;
        }
        let Some(index) = self.selection.selected() else {
            return;
        };
        if self.phase.get() == TrackerPhase::Auditing && !force {
            tracing::trace!("scroll_to_selected: audit in progress");
            return;
        }
        if self.animator.is_active() && !force {
            tracing::trace!("scroll_to_selected: animation in flight");
            return;
        }
        let Some(container) = self.layout.container() else {
            return;
        };
        let Some(item) = self.layout.item_rect(index) else {
            return;
        };

        let view = container.rect();
        if !force && is_comfortably_visible(item, view) {
            return;
        }
        if !force && !is_outside(item, view) {
            return;
        }

        let target = centering_target(container.scroll_top(), item, view);
        tracing::debug!(index, target, force, "correcting viewport");
        self.phase.set(TrackerPhase::Correcting);
        self.animator.smooth_scroll_to(target, force);
        self.schedule_settle_check(index);
    }

    fn schedule_settle_check(self: &Rc<Self>, index: usize) {
        if let Some(previous) = self.settle_timer.take() {
            self.scheduler.clear_timer(previous);
        }
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.set_timeout(
            self.timings.settle_delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.settle_check(index);
                }
            }),
        );
        self.settle_timer.set(Some(handle));
    }

    fn settle_check(self: &Rc<Self>, index: usize) {
        self.settle_timer.set(None);
        if self.phase.get() == TrackerPhase::Correcting {
            self.phase.set(TrackerPhase::Idle);
        }

        match self.selection.selected() {
            Some(current) if current == index => {
                let still_outside = self
                    .layout
                    .container()
                    .zip(self.layout.item_rect(index))
                    .is_some_and(|(container, item)| is_outside(item, container.rect()));
                if still_outside {
                    let retries = self.settle_retries.get() + 1;
                    self.settle_retries.set(retries);
                    if retries == 1 {
                        tracing::debug!(index, "settle-check: still out of view");
                    } else {
                        tracing::trace!(index, retries, "settle-check: item never fits, re-forcing");
                    }
                    self.schedule_forced_correction();
                } else {
                    self.settle_retries.set(0);
                }
            }
            // The selection moved on while we were scrolling.
            Some(_) => {
                self.settle_retries.set(0);
                self.schedule_forced_correction();
            }
            None => self.settle_retries.set(0),
        }
    }

    fn schedule_forced_correction(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.debounce.schedule(move || {
            if let Some(inner) = weak.upgrade() {
                inner.scroll_to_selected(true);
            }
        });
    }

    fn on_selection_changed(self: &Rc<Self>) {
        if self.torn_down.get() {
            return;
        }
        if self.selection.selected().is_some() && self.phase.get() != TrackerPhase::Correcting {
            self.schedule_forced_correction();
        }
    }

    fn start_position_checking(self: &Rc<Self>) {
        if self.torn_down.get() {
            return;
        }
        let existing = self.audit.get();
        if existing.is_some() {
            return;
        }

        let weak = Rc::downgrade(self);
        let resize = self.resize.observe(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_resize();
            }
        }));

        let weak: Weak<Self> = Rc::downgrade(self);
        let interval = self.scheduler.set_interval(
            self.timings.audit_period,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.audit();
                }
            }),
        );

        self.audit.set(Some(AuditHandles { interval, resize }));
        tracing::debug!(period = ?self.timings.audit_period, "position checking started");
    }

    fn on_resize(self: &Rc<Self>) {
        if let Some(pending) = self.resize_timer.take() {
            self.scheduler.clear_timer(pending);
        }
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.set_timeout(
            self.timings.resize_debounce,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.resize_timer.set(None);
                if inner.phase.get() != TrackerPhase::Correcting
                    && inner.selection.selected().is_some()
                {
                    tracing::debug!("container resized, re-centring selection");
                    inner.schedule_forced_correction();
                }
            }),
        );
        self.resize_timer.set(Some(handle));
    }

    fn audit(self: &Rc<Self>) {
        let Some(index) = self.selection.selected() else {
            return;
        };
        if self.phase.get() != TrackerPhase::Idle {
            return;
        }
        let Some(container) = self.layout.container() else {
            return;
        };
        let Some(item) = self.layout.item_rect(index) else {
            return;
        };
        if !is_outside(item, container.rect()) {
            return;
        }

        tracing::debug!(index, "audit: selection out of view");
        self.phase.set(TrackerPhase::Auditing);
        self.schedule_forced_correction();

        if let Some(previous) = self.release_timer.take() {
            self.scheduler.clear_timer(previous);
        }
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.set_timeout(
            self.timings.audit_release,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.release_timer.set(None);
                    // A dispatched correction owns the phase from here on.
                    if inner.phase.get() == TrackerPhase::Auditing {
                        inner.phase.set(TrackerPhase::Idle);
                    }
                }
            }),
        );
        self.release_timer.set(Some(handle));
    }

    fn on_wheel(self: &Rc<Self>, event: &WheelEvent) -> WheelOutcome {
        if self.torn_down.get() || !self.wheel_ready.get() {
            return WheelOutcome::PassThrough;
        }
        let now = self.scheduler.now();
        let outcome = self
            .wheel
            .borrow_mut()
            .handle(event, now, self.selection.as_ref());
        if outcome == (WheelOutcome::Consumed { moved: true }) {
            self.on_selection_changed();
        }
        outcome
    }

    fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        if let Some(handles) = self.audit.take() {
            self.resize.disconnect(handles.resize);
            self.scheduler.clear_timer(handles.interval);
        }
        for timer in [&self.resize_timer, &self.settle_timer, &self.release_timer] {
            if let Some(handle) = timer.take() {
                self.scheduler.clear_timer(handle);
            }
        }
        self.debounce.cancel();
        self.animator.cleanup();
        self.phase.set(TrackerPhase::Idle);
        tracing::debug!("viewport tracker torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::scheduler::ManualScheduler;
    use crate::core::test_support::{TestGallery, TestLayout};
    use crate::core::viewport::ResizeNotifier;

    struct Rig {
        sched: Rc<ManualScheduler>,
        gallery: Rc<TestGallery>,
        layout: Rc<TestLayout>,
        notifier: Rc<ResizeNotifier>,
        tracker: ViewportTracker,
    }

    /// 1000-high viewport over 100 rows of 100.
    fn rig(selected: Option<usize>) -> Rig {
        let sched = Rc::new(ManualScheduler::new());
        let gallery = Rc::new(TestGallery::new(100, selected));
        let layout = Rc::new(TestLayout::new(1000.0, 100.0, 100));
        let notifier = Rc::new(ResizeNotifier::new());
        let tracker = ViewportTracker::new(
            sched.clone(),
            gallery.clone(),
            layout.clone(),
            notifier.clone(),
            TrackerTimings::default(),
        );
        tracker.mount();
        Rig {
            sched,
            gallery,
            layout,
            notifier,
            tracker,
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    impl Rig {
        fn scroll_top(&self) -> f64 {
            self.layout.container.scroll_top.get()
        }

        fn writes(&self) -> usize {
            self.layout.container.writes.borrow().len()
        }

        /// Every item reports a rect far below the viewport, whatever the
        /// offset.
        fn pin_out_of_view(&self) {
            self.layout.pinned.set(Some(Rect::new(5000.0, 100.0)));
        }
    }

    #[test]
    fn comfortably_visible_item_is_left_alone() {
        let rig = rig(Some(3));
        rig.tracker.scroll_to_selected(false);
        rig.sched.advance(ms(1000));
        assert_eq!(rig.writes(), 0);
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
    }

    #[test]
    fn item_in_margin_band_but_inside_is_not_corrected() {
        let rig = rig(Some(9));
        rig.layout.container.scroll_top.set(50.0);
        // Item 9 spans 850..950: outside the comfort band, inside the view.
        rig.tracker.scroll_to_selected(false);
        assert!(!rig.tracker.animator().is_active());
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
    }

    #[test]
    fn item_below_the_fold_is_centred() {
        let rig = rig(Some(14));
        // Item 14 spans 1400..1500 in a 0..1000 viewport.
        rig.tracker.scroll_to_selected(false);
        assert_eq!(rig.tracker.animator().target(), Some(950.0));
        assert!(rig.tracker.is_auto_scrolling());

        rig.sched.advance(ms(250));
        assert_eq!(rig.scroll_top(), 950.0);

        rig.sched.advance(ms(100));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
        assert_eq!(rig.sched.pending_frames(), 0);
    }

    #[test]
    fn unforced_call_defers_to_running_animation() {
        let rig = rig(Some(14));
        rig.tracker.smooth_scroll(3000.0, false);
        rig.tracker.scroll_to_selected(false);
        assert_eq!(rig.tracker.animator().target(), Some(3000.0));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
    }

    #[test]
    fn forced_call_overrides_running_animation() {
        let rig = rig(Some(14));
        rig.tracker.smooth_scroll(3000.0, false);
        rig.tracker.scroll_to_selected(true);
        assert_eq!(rig.tracker.animator().target(), Some(950.0));
    }

    #[test]
    fn no_selection_is_a_no_op() {
        let rig = rig(None);
        rig.tracker.scroll_to_selected(true);
        rig.sched.advance(ms(600));
        assert_eq!(rig.writes(), 0);
    }

    #[test]
    fn audit_brings_a_stray_selection_back() {
        let rig = rig(Some(30));
        rig.sched.advance(ms(700));
        // 3000 - 500 + 50
        assert_eq!(rig.scroll_top(), 2550.0);
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
    }

    #[test]
    fn audit_holds_the_phase_until_its_correction_runs() {
        let rig = rig(Some(30));
        rig.sched.advance_timers(ms(250));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Auditing);
        assert!(rig.tracker.is_checking_position());
        assert_eq!(rig.sched.pending_frames(), 1);
        assert_eq!(rig.writes(), 0);

        rig.sched.run_frame();
        assert_eq!(rig.tracker.phase(), TrackerPhase::Correcting);
        assert_eq!(rig.tracker.animator().target(), Some(2550.0));
    }

    #[test]
    fn unforced_request_waits_out_an_audit() {
        let rig = rig(Some(30));
        rig.sched.advance_timers(ms(250));
        rig.tracker.scroll_to_selected(false);
        assert!(!rig.tracker.animator().is_active());
        assert_eq!(rig.tracker.phase(), TrackerPhase::Auditing);
        assert_eq!(rig.writes(), 0);

        // Nothing ran the audit's frame, so the release hands back to idle.
        rig.sched.advance_timers(ms(200));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Idle);
        assert_eq!(rig.writes(), 0);
    }

    #[test]
    fn audit_stands_down_while_correcting() {
        let rig = rig(Some(30));
        rig.pin_out_of_view();
        rig.tracker.scroll_to_selected(true);
        assert!(rig.tracker.is_auto_scrolling());

        rig.sched.advance_timers(ms(250));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Correcting);
        assert!(!rig.tracker.inner.debounce.is_pending());
        // The animation frame, plus the interval and settle-check timers.
        assert_eq!(rig.sched.pending_frames(), 1);
        assert_eq!(rig.sched.pending_timers(), 2);
    }

    #[test]
    fn resize_during_correction_schedules_nothing() {
        let rig = rig(Some(30));
        rig.pin_out_of_view();
        rig.tracker.scroll_to_selected(true);
        rig.notifier.notify();

        rig.sched.advance_timers(ms(100));
        assert_eq!(rig.tracker.phase(), TrackerPhase::Correcting);
        assert!(!rig.tracker.inner.debounce.is_pending());
        assert_eq!(rig.sched.pending_frames(), 1);
    }

    #[test]
    fn item_that_never_fits_keeps_re_correcting() {
        let rig = rig(Some(30));
        rig.pin_out_of_view();
        rig.tracker.scroll_to_selected(true);
        // Settle-checks at 300, 604 and 908 each re-force a correction.
        rig.sched.advance(ms(1000));
        assert_eq!(rig.tracker.inner.settle_retries.get(), 3);
        assert_eq!(rig.tracker.phase(), TrackerPhase::Correcting);
        // The audit never got a turn: no release timer is live.
        assert_eq!(rig.sched.pending_timers(), 2);
    }

    #[test]
    fn settle_check_follows_a_selection_that_moved_on() {
        let rig = rig(Some(30));
        rig.tracker.scroll_to_selected(true);
        rig.gallery.selected.set(Some(60));
        rig.sched.advance(ms(1200));
        // Item 60 centred from 2550: 2550 + 3450 - 500 + 50.
        assert_eq!(rig.scroll_top(), 5550.0);
    }

    #[test]
    fn resize_burst_collapses_into_one_correction() {
        let rig = rig(Some(30));
        for _ in 0..5 {
            rig.notifier.notify();
            rig.sched.advance(ms(10));
        }
        // Last notify at 40ms; the debounce holds until 140ms.
        rig.sched.advance(ms(89));
        assert_eq!(rig.writes(), 0);
        assert!(!rig.tracker.animator().is_active());

        rig.sched.advance(ms(20));
        assert!(rig.tracker.animator().is_active());
        rig.sched.advance(ms(500));
        assert_eq!(rig.scroll_top(), 2550.0);
    }

    #[test]
    fn position_checking_starts_once() {
        let rig = rig(Some(3));
        rig.tracker.start_position_checking();
        rig.tracker.start_position_checking();
        assert_eq!(rig.sched.pending_timers(), 1);
        assert_eq!(rig.notifier.observer_count(), 1);
    }

    #[test]
    fn selection_change_is_followed_on_next_frame() {
        let rig = rig(Some(3));
        rig.gallery.selected.set(Some(40));
        rig.tracker.on_selection_changed();
        assert_eq!(rig.sched.pending_frames(), 1);
        rig.sched.advance(ms(16));
        assert!(rig.tracker.is_auto_scrolling());
        rig.sched.advance(ms(400));
        assert_eq!(rig.scroll_top(), 3550.0);
    }

    #[test]
    fn wheel_passes_through_until_set_up() {
        let sched = Rc::new(ManualScheduler::new());
        let gallery = Rc::new(TestGallery::new(10, Some(2)));
        let layout = Rc::new(TestLayout::new(1000.0, 100.0, 10));
        let tracker = ViewportTracker::new(
            sched.clone(),
            gallery.clone(),
            layout,
            Rc::new(ResizeNotifier::new()),
            TrackerTimings::default(),
        );
        let tick = WheelEvent::lines(1.0);
        assert_eq!(tracker.on_wheel(&tick), WheelOutcome::PassThrough);
        tracker.setup_wheel_handler();
        tracker.setup_wheel_handler();
        assert_eq!(tracker.on_wheel(&tick), WheelOutcome::Consumed { moved: true });
        assert_eq!(*gallery.calls.borrow(), vec![Some(3)]);
    }

    #[test]
    fn wheel_move_schedules_a_correction() {
        let rig = rig(Some(9));
        rig.layout.container.scroll_top.set(50.0);
        let outcome = rig.tracker.on_wheel(&WheelEvent::lines(1.0));
        assert_eq!(outcome, WheelOutcome::Consumed { moved: true });
        rig.sched.advance(ms(16));
        // Item 10 at 950..1050 crosses the bottom edge; forced correction.
        assert_eq!(rig.tracker.animator().target(), Some(550.0));
    }

    #[test]
    fn teardown_cancels_everything() {
        let rig = rig(Some(30));
        rig.tracker.scroll_to_selected(true);
        rig.notifier.notify();
        rig.sched.advance(ms(32));
        rig.tracker.on_selection_changed();

        rig.tracker.teardown();
        assert_eq!(rig.sched.pending_frames(), 0);
        assert_eq!(rig.sched.pending_timers(), 0);
        assert_eq!(rig.notifier.observer_count(), 0);

        let writes = rig.writes();
        rig.tracker.scroll_to_selected(true);
        rig.notifier.notify();
        rig.sched.advance(ms(1000));
        assert_eq!(rig.writes(), writes);
        assert_eq!(rig.tracker.on_wheel(&WheelEvent::lines(1.0)), WheelOutcome::PassThrough);
    }

    #[test]
    fn dropping_the_tracker_leaves_nothing_scheduled() {
        let rig = rig(Some(30));
        rig.tracker.scroll_to_selected(true);
        let Rig {
            sched,
            notifier,
            tracker,
            ..
        } = rig;
        drop(tracker);
        assert_eq!(sched.pending_frames(), 0);
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn debounced_frame_replaces_pending_callback() {
        let sched = Rc::new(ManualScheduler::new());
        let debounce = DebouncedFrame::new(sched.clone());
        let hits = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let hits = Rc::clone(&hits);
            debounce.schedule(move || hits.borrow_mut().push(tag));
        }
        assert!(debounce.is_pending());
        assert_eq!(sched.pending_frames(), 1);
        sched.run_frame();
        assert_eq!(*hits.borrow(), vec!["third"]);
        assert!(!debounce.is_pending());
    }
}
