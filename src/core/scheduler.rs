//! Cooperative single-threaded scheduling.
//!
//! Everything in the engine runs on one UI thread.  Work that has to happen
//! "later" is handed to a [`Scheduler`]: either on the next display frame or
//! after a timer delay.  The scheduler is injected rather than global so the
//! host decides what a frame is and tests can fast-forward time
//! deterministically with [`ManualScheduler`].

use std::cell::RefCell;
use std::time::Duration;

/// Default spacing between display frames (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cancellation token for a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Cancellation token for a pending timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Callback run on the next display frame with the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(Duration)>;

/// Per-frame and timer scheduling capability.
///
/// All methods take `&self`: callbacks re-enter the scheduler while it is
/// running them, so implementations keep their queues behind interior
/// mutability and never hold a borrow across a callback.
pub trait Scheduler {
    /// Monotonic time since the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Run `callback` on the next display frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending frame callback.  Unknown or fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);

    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;

    /// Run `callback` every `period` until cleared.
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle;

    /// Clear a timeout or interval.  Unknown or fired handles are ignored.
    fn clear_timer(&self, handle: TimerHandle);
}

// ───────────────────────────────────────── manual ────────────

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        callback: Box<dyn FnMut()>,
    },
}

struct Timer {
    handle: TimerHandle,
    due: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct Queues {
    now: Duration,
    next_id: u64,
    frames: Vec<(FrameHandle, FrameCallback)>,
    timers: Vec<Timer>,
    /// Interval currently executing (it is out of `timers` while it runs).
    running_interval: Option<TimerHandle>,
    running_cleared: bool,
}

impl Queues {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Index of the earliest timer due at or before `until`.  Ties are broken
    /// by issue order (handle ids are monotonic).
    fn earliest_due(&self, until: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i)
    }
}

/// Deterministic virtual-clock scheduler.
///
/// Time only moves when the owner calls [`advance`](Self::advance) or
/// [`advance_to`](Self::advance_to).  Time is walked in frame steps: within
/// each step, due timers fire in order at their due time, then the frame
/// batch queued before the step runs.
pub struct ManualScheduler {
    frame_interval: Duration,
    queues: RefCell<Queues>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            queues: RefCell::new(Queues::default()),
        }
    }

    /// Move the clock forward by `by`, firing everything that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.advance_to(target);
    }

    /// Move the clock forward to `target`.  Targets in the past are ignored.
    pub fn advance_to(&self, target: Duration) {
        while self.now() < target {
            let step_end = (self.now() + self.frame_interval).min(target);
            self.fire_timers_until(step_end);
            self.queues.borrow_mut().now = step_end;
            self.run_frame();
        }
    }

    /// Move the clock forward by `by`, firing only timers.  Queued frame
    /// callbacks stay queued until the next [`run_frame`](Self::run_frame) or
    /// `advance`.
    pub fn advance_timers(&self, by: Duration) {
        let target = self.now() + by;
        self.fire_timers_until(target);
        let mut q = self.queues.borrow_mut();
        q.now = q.now.max(target);
    }

    /// Run the frame callbacks queued so far at the current time.  Callbacks
    /// requested while the batch runs wait for the next frame.
    pub fn run_frame(&self) {
        let (batch, now): (Vec<FrameHandle>, Duration) = {
            let q = self.queues.borrow();
            (q.frames.iter().map(|(h, _)| *h).collect(), q.now)
        };
        for handle in batch {
            // A callback earlier in the batch may have cancelled this one.
            let callback = {
                let mut q = self.queues.borrow_mut();
                q.frames
                    .iter()
                    .position(|(h, _)| *h == handle)
                    .map(|pos| q.frames.remove(pos).1)
            };
            if let Some(callback) = callback {
                callback(now);
            }
        }
    }

    /// Number of frame callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.queues.borrow().frames.len()
    }

    /// Number of live timeouts and intervals.
    pub fn pending_timers(&self) -> usize {
        let q = self.queues.borrow();
        q.timers.len() + usize::from(q.running_interval.is_some() && !q.running_cleared)
    }

    fn fire_timers_until(&self, until: Duration) {
        loop {
            let timer = {
                let mut q = self.queues.borrow_mut();
                let Some(idx) = q.earliest_due(until) else {
                    break;
                };
                let timer = q.timers.remove(idx);
                q.now = q.now.max(timer.due);
                timer
            };

            match timer.task {
                TimerTask::Once(callback) => callback(),
                TimerTask::Repeat {
                    period,
                    mut callback,
                } => {
                    {
                        let mut q = self.queues.borrow_mut();
                        q.running_interval = Some(timer.handle);
                        q.running_cleared = false;
                    }
                    callback();
                    let mut q = self.queues.borrow_mut();
                    let cleared = q.running_cleared;
                    q.running_interval = None;
                    q.running_cleared = false;
                    if !cleared {
                        q.timers.push(Timer {
                            handle: timer.handle,
                            due: timer.due + period,
                            task: TimerTask::Repeat { period, callback },
                        });
                    }
                }
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.queues.borrow().now
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut q = self.queues.borrow_mut();
        let handle = FrameHandle(q.next_id());
        q.frames.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queues.borrow_mut().frames.retain(|(h, _)| *h != handle);
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let mut q = self.queues.borrow_mut();
        let handle = TimerHandle(q.next_id());
        let due = q.now + delay;
        q.timers.push(Timer {
            handle,
            due,
            task: TimerTask::Once(callback),
        });
        handle
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        let mut q = self.queues.borrow_mut();
        let handle = TimerHandle(q.next_id());
        let due = q.now + period;
        q.timers.push(Timer {
            handle,
            due,
            task: TimerTask::Repeat { period, callback },
        });
        handle
    }

    fn clear_timer(&self, handle: TimerHandle) {
        let mut q = self.queues.borrow_mut();
        if q.running_interval == Some(handle) {
            q.running_cleared = true;
        }
        q.timers.retain(|t| t.handle != handle);
    }
}
