//! Virtual-clock scheduler.
//!
//! Time only moves when the owner calls [`ManualScheduler::advance`],
//! [`ManualScheduler::advance_to`] or [`ManualScheduler::run_next`]. While a
//! callback runs, `now()` reads as that callback's due time, so anything it
//! schedules is measured from the moment it was meant to fire.
//!
//! A chain of zero-delay callbacks that never lets time move is cut after
//! [`MAX_FIRES_PER_INSTANT`] fires at one instant, leaving the clock there.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use tracing::warn;

use super::queue::TimerQueue;
use super::{Scheduler, TimerCallback, TimerHandle};

/// Most callbacks `advance_to` fires back to back at one due time.
pub const MAX_FIRES_PER_INSTANT: usize = 10_000;

/// Deterministic scheduler driven by explicit clock advances.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<TimerQueue>,
    fired: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Total callbacks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }

    /// Absolute due time of the earliest pending callback.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.borrow().next_due()
    }

    /// Fire exactly one callback - the earliest pending - moving the clock to
    /// its due time. Returns that time, or None if nothing is pending.
    pub fn run_next(&self) -> Option<Duration> {
        let popped = self.queue.borrow_mut().pop_due(Duration::MAX);
        let (due, callback) = popped?;
        self.fire(due, callback);
        Some(due)
    }

    /// Move the clock forward by `by`, firing everything that comes due.
    /// Returns the number of callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        self.advance_to(self.now.get().saturating_add(by))
    }

    /// Move the clock to `target` (never backwards), firing everything due
    /// on the way, including callbacks scheduled by those callbacks.
    ///
    /// Stops early, with the clock at the stuck instant, once
    /// [`MAX_FIRES_PER_INSTANT`] callbacks have fired at the same due time.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut count = 0;
        let mut streak = 0;
        let mut last_due = None;
        loop {
            // Borrow ends before the callback runs so it can reschedule.
            let popped = self.queue.borrow_mut().pop_due(target);
            let Some((due, callback)) = popped else {
                break;
            };
            if last_due == Some(due) {
                streak += 1;
            } else {
                last_due = Some(due);
                streak = 1;
            }
            self.fire(due, callback);
            count += 1;

            if streak >= MAX_FIRES_PER_INSTANT && self.next_due() == Some(due) {
                warn!(?due, fired = streak, "zero-delay timer chain, clock held");
                return count;
            }
        }
        if target > self.now.get() {
            self.now.set(target);
        }
        count
    }

    fn fire(&self, due: Duration, callback: TimerCallback) {
        if due > self.now.get() {
            self.now.set(due);
        }
        self.fired.set(self.fired.get() + 1);
        callback();
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let due = self.now.get().saturating_add(delay);
        self.queue.borrow_mut().push(due, callback)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.queue.borrow_mut().cancel(handle)
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
