//! Time-based eased scrolling of a single container.
//!
//! [`ScrollAnimator::smooth_scroll_to`] moves the container's offset from
//! where it is now to a clamped target over a fixed duration, one scheduler
//! frame at a time.  At most one run is live; a forced call cancels the
//! previous run before starting its own, so two runs never interleave.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::geometry::ScrollBounds;
use super::scheduler::{FrameHandle, Scheduler};
use super::viewport::ScrollContainer;

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

/// Ease-in-out quadratic curve over `p ∈ [0, 1]`.
pub fn ease_in_out_quad(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// State of one in-flight animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRun {
    id: u64,
    pub start_y: f64,
    pub start_time: Duration,
    /// Already clamped into the container's bounds.
    pub target_y: f64,
}

#[derive(Default)]
struct AnimatorState {
    container: Option<Rc<dyn ScrollContainer>>,
    /// Pending frame of the live run.
    frame: Option<FrameHandle>,
    run: Option<AnimationRun>,
    last_run_id: u64,
}

/// Eased, cancellable scroll-to-target animator.
pub struct ScrollAnimator {
    scheduler: Rc<dyn Scheduler>,
    duration: Duration,
    state: Rc<RefCell<AnimatorState>>,
}

impl ScrollAnimator {
    pub fn new(scheduler: Rc<dyn Scheduler>, duration: Duration) -> Self {
        Self {
            scheduler,
            duration,
            state: Rc::new(RefCell::new(AnimatorState::default())),
        }
    }

    /// Bind the container to animate.  Rebinding cancels a running animation.
    pub fn init(&self, container: Rc<dyn ScrollContainer>) {
        self.cleanup();
        self.state.borrow_mut().container = Some(container);
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current scroll bounds, `{0, 0}` when no container is bound.
    pub fn bounds(&self) -> ScrollBounds {
        self.state
            .borrow()
            .container
            .as_ref()
            .map(|c| c.bounds())
            .unwrap_or_default()
    }

    /// True while a run is progressing.
    pub fn is_active(&self) -> bool {
        self.state.borrow().run.is_some()
    }

    /// Effective (clamped) target of the live run.
    pub fn target(&self) -> Option<f64> {
        self.state.borrow().run.map(|r| r.target_y)
    }

    /// Animate the container to `target_y`.
    ///
    /// Silently does nothing without a bound container, or when a run is
    /// already live and `force` is false.
    pub fn smooth_scroll_to(&self, target_y: f64, force: bool) {
        let container = {
            let state = self.state.borrow();
            let Some(container) = state.container.clone() else {
                tracing::trace!("smooth_scroll_to: no container bound");
                return;
            };
            if state.run.is_some() && !force {
                tracing::trace!("smooth_scroll_to: run in flight, not forced");
                return;
            }
            container
        };

        self.cleanup();

        let target_y = container.bounds().clamp(target_y);
        let run = {
            let mut state = self.state.borrow_mut();
            state.last_run_id += 1;
            let run = AnimationRun {
                id: state.last_run_id,
                start_y: container.scroll_top(),
                start_time: self.scheduler.now(),
                target_y,
            };
            state.run = Some(run);
            run
        };
        tracing::debug!(from = run.start_y, to = run.target_y, "scroll animation start");

        let handle = schedule_step(&self.state, &self.scheduler, self.duration, run);
        self.state.borrow_mut().frame = Some(handle);
    }

    /// Cancel the pending frame and clear the running state.  Safe to call
    /// when nothing is running.
    pub fn cleanup(&self) {
        let frame = {
            let mut state = self.state.borrow_mut();
            state.run = None;
            state.frame.take()
        };
        if let Some(frame) = frame {
            self.scheduler.cancel_frame(frame);
        }
    }
}

impl Drop for ScrollAnimator {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn schedule_step(
    state: &Rc<RefCell<AnimatorState>>,
    scheduler: &Rc<dyn Scheduler>,
    duration: Duration,
    run: AnimationRun,
) -> FrameHandle {
    let weak = Rc::downgrade(state);
    let sched = Rc::clone(scheduler);
    scheduler.request_frame(Box::new(move |now| {
        if let Some(state) = weak.upgrade() {
            step(&state, &sched, duration, run, now);
        }
    }))
}

fn step(
    state: &Rc<RefCell<AnimatorState>>,
    scheduler: &Rc<dyn Scheduler>,
    duration: Duration,
    run: AnimationRun,
    now: Duration,
) {
    let container = {
        let mut s = state.borrow_mut();
        match (s.run, s.container.clone()) {
            (Some(live), Some(container)) if live.id == run.id => {
                s.frame = None;
                container
            }
            // Superseded or cancelled run.
            _ => return,
        }
    };

    let p = progress(now.saturating_sub(run.start_time), duration);
    if p < 1.0 {
        let (lo, hi) = if run.start_y <= run.target_y {
            (run.start_y, run.target_y)
        } else {
            (run.target_y, run.start_y)
        };
        let y = run.start_y + (run.target_y - run.start_y) * ease_in_out_quad(p);
        container.set_scroll_top(y.clamp(lo, hi));
        let handle = schedule_step(state, scheduler, duration, run);
        state.borrow_mut().frame = Some(handle);
    } else {
        container.set_scroll_top(run.target_y);
        state.borrow_mut().run = None;
        tracing::trace!(at = run.target_y, "scroll animation settled");
    }
}
