//! Wall-clock scheduler for the terminal event loop.
//!
//! Nothing runs on a background thread. The loop asks for
//! [`RealtimeScheduler::next_deadline`], waits at most that long for input,
//! then calls [`RealtimeScheduler::run_due`].

use std::cell::RefCell;
use std::time::{Duration, Instant};

use super::queue::TimerQueue;
use super::{Scheduler, TimerCallback, TimerHandle};

pub struct RealtimeScheduler {
    origin: Instant,
    queue: RefCell<TimerQueue>,
}

impl RealtimeScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: RefCell::new(TimerQueue::new()),
        }
    }

    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Time until the earliest pending callback is due (zero if overdue).
    pub fn next_deadline(&self) -> Option<Duration> {
        let due = self.queue.borrow().next_due()?;
        Some(due.saturating_sub(self.elapsed()))
    }

    /// Fire every callback due as of now. Callbacks scheduled while running
    /// are measured from the current time and wait for a later pass.
    pub fn run_due(&self) -> usize {
        let now = self.elapsed();
        let mut count = 0;
        loop {
            let popped = self.queue.borrow_mut().pop_due(now);
            let Some((_, callback)) = popped else {
                break;
            };
            callback();
            count += 1;
        }
        count
    }
}

impl Default for RealtimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RealtimeScheduler {
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let due = self.elapsed().saturating_add(delay);
        self.queue.borrow_mut().push(due, callback)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.queue.borrow_mut().cancel(handle)
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
