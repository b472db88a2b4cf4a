//! Timer queue shared by the scheduler implementations.
//!
//! Timers are ordered by `(due, id)`; ids grow monotonically so equal due
//! times fire in scheduling order. Time is an offset from the scheduler's
//! origin, which keeps the queue independent of the clock in use.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{TimerCallback, TimerHandle};

#[derive(Default)]
pub(crate) struct TimerQueue {
    timers: BTreeMap<(Duration, u64), TimerCallback>,
    due_by_id: HashMap<u64, Duration>,
    next_id: u64,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, due: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert((due, id), callback);
        self.due_by_id.insert(id, due);
        TimerHandle::new(id)
    }

    pub(crate) fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_id.remove(&handle.id()) {
            Some(due) => self.timers.remove(&(due, handle.id())).is_some(),
            None => false,
        }
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerCallback)> {
        let (&(due, id), _) = self.timers.first_key_value()?;
        if due > now {
            return None;
        }
        self.due_by_id.remove(&id);
        self.timers.remove(&(due, id)).map(|callback| (due, callback))
    }

    pub(crate) fn next_due(&self) -> Option<Duration> {
        self.timers.first_key_value().map(|(&(due, _), _)| due)
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }
}
