//! Host scheduler - delayed callbacks with cancellation.
//!
//! Everything animated in the banner advances by asking a [`Scheduler`] to
//! run a callback after a delay. Two implementations ship with the crate:
//!
//! - [`ManualScheduler`] - virtual clock, advanced explicitly. Deterministic,
//!   used by tests and by hosts that own their own notion of time.
//! - [`RealtimeScheduler`] - wall clock. The host loop calls
//!   [`RealtimeScheduler::run_due`] and sleeps until
//!   [`RealtimeScheduler::next_deadline`].
//!
//! Components never hold more than one timer at a time; [`TimerSlot`]
//! carries that discipline (pending handle + generation guard).
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use std::time::Duration;
//! use spark_hero::scheduler::{ManualScheduler, Scheduler};
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! scheduler.schedule_after(Duration::from_millis(10), Box::new(|| println!("fired")));
//! scheduler.advance(Duration::from_millis(10));
//! ```

mod manual;
mod queue;
mod realtime;
mod slot;

pub use manual::{ManualScheduler, MAX_FIRES_PER_INSTANT};
pub use realtime::RealtimeScheduler;
pub use slot::TimerSlot;

use std::time::Duration;

/// Callback run once when a timer fires.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Opaque reference to a scheduled callback, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Facility that runs callbacks after a delay.
///
/// Implementations must:
/// - accept a zero delay (the callback runs on the next dispatch, never
///   re-entrantly from `schedule_after`)
/// - run callbacks with the same due time in scheduling order
/// - allow callbacks to schedule and cancel (no borrow held while running one)
pub trait Scheduler {
    /// Run `callback` once, `delay` from now.
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Drop a pending callback. Returns false if it already ran or was
    /// already cancelled.
    fn cancel(&self, handle: TimerHandle) -> bool;

    /// Number of callbacks waiting to run.
    fn pending(&self) -> usize;
}
