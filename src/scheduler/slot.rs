//! Single-timer slot with a generation guard.
//!
//! A component that animates itself keeps exactly one pending callback. The
//! slot remembers its handle and a generation counter:
//!
//! - [`TimerSlot::cancel`] cancels the pending handle and bumps the
//!   generation, so a callback that was already dispatched but not yet run
//!   is rejected when it calls [`TimerSlot::consume`].
//! - A firing callback calls `consume(generation)` before touching state,
//!   then re-arms its successor with [`TimerSlot::arm`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::{Scheduler, TimerCallback, TimerHandle};

pub struct TimerSlot {
    scheduler: Rc<dyn Scheduler>,
    pending: Cell<Option<TimerHandle>>,
    generation: Cell<u64>,
}

impl TimerSlot {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Cell::new(None),
            generation: Cell::new(0),
        }
    }

    /// Generation a callback armed right now belongs to.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Cancel the pending callback (if any) and invalidate every callback
    /// armed before this call.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Claim a firing callback. Returns false for a stale one; the caller
    /// must then return without touching state.
    pub fn consume(&self, generation: u64) -> bool {
        if generation != self.generation.get() {
            return false;
        }
        self.pending.set(None);
        true
    }

    /// Schedule the successor. Any handle still pending is cancelled first,
    /// so the slot never holds two.
    pub fn arm(&self, delay: Duration, callback: TimerCallback) {
        if let Some(stale) = self.pending.take() {
            self.scheduler.cancel(stale);
        }
        let handle = self.scheduler.schedule_after(delay, callback);
        self.pending.set(Some(handle));
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
