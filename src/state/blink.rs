//! Cursor Blink - Periodic visibility toggle
//!
//! A [`CursorBlinker`] flips a `visible` signal every period, forever, on its
//! own timer. It knows nothing about the typewriter; the hosting view only
//! renders the two side by side.
//!
//! # Pattern
//!
//! - `start` resets to visible and arms the first toggle
//! - every toggle re-arms the next one (one pending timer at most)
//! - `stop` cancels the timer and resets to visible
//!
//! # Example
//!
//! ```ignore
//! use spark_hero::state::blink::CursorBlinker;
//!
//! let blinker = CursorBlinker::new(scheduler.clone());
//! blinker.start(530)?;
//!
//! let visible = blinker.visible();
//!
//! blinker.stop();
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::scheduler::{Scheduler, TimerSlot};

/// Standard terminal-ish blink period.
pub const DEFAULT_BLINK_PERIOD_MS: u64 = 530;

struct BlinkCore {
    timer: TimerSlot,
    /// Some while running
    period: Cell<Option<Duration>>,
    visible: Signal<bool>,
}

/// Blinking cursor clock.
pub struct CursorBlinker {
    core: Rc<BlinkCore>,
}

impl CursorBlinker {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            core: Rc::new(BlinkCore {
                timer: TimerSlot::new(scheduler),
                period: Cell::new(None),
                visible: signal(true), // Start visible
            }),
        }
    }

    /// Start toggling every `period_ms`. Restarts the clock if running.
    pub fn start(&self, period_ms: u64) -> Result<(), ConfigError> {
        if period_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "cursor_blink_period_ms",
            });
        }

        let period = Duration::from_millis(period_ms);
        self.core.timer.cancel();
        self.core.period.set(Some(period));
        self.core.set_visible(true);
        debug!(period_ms, "cursor blink start");
        self.core.arm(period);
        Ok(())
    }

    /// Stop toggling and reset to visible. Idempotent.
    pub fn stop(&self) {
        if self.core.period.take().is_none() {
            return;
        }
        self.core.timer.cancel();
        self.core.set_visible(true);
        debug!("cursor blink stop");
    }

    pub fn is_running(&self) -> bool {
        self.core.period.get().is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.core.period.get()
    }

    /// Current blink phase: true = visible, false = hidden
    pub fn visible(&self) -> bool {
        self.core.visible.get()
    }

    pub fn visible_signal(&self) -> Signal<bool> {
        self.core.visible.clone()
    }
}

impl Drop for CursorBlinker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl BlinkCore {
    fn arm(self: &Rc<Self>, period: Duration) {
        let core = Rc::downgrade(self);
        let generation = self.timer.generation();
        self.timer.arm(
            period,
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    core.on_toggle(generation);
                }
            }),
        );
    }

    fn on_toggle(self: &Rc<Self>, generation: u64) {
        if !self.timer.consume(generation) {
            trace!(generation, "stale blink toggle dropped");
            return;
        }
        let visible = !self.visible.get();
        self.set_visible(visible);

        if self.timer.generation() != generation {
            return;
        }
        if let Some(period) = self.period.get() {
            self.arm(period);
        }
    }

    fn set_visible(&self, visible: bool) {
        if self.visible.get() != visible {
            self.visible.set(visible);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use spark_signals::effect;

    fn setup() -> (Rc<ManualScheduler>, CursorBlinker) {
        let scheduler = Rc::new(ManualScheduler::new());
        let blinker = CursorBlinker::new(scheduler.clone());
        (scheduler, blinker)
    }

    #[test]
    fn test_zero_period_rejected() {
        let (scheduler, blinker) = setup();
        assert_eq!(
            blinker.start(0),
            Err(ConfigError::ZeroDuration {
                field: "cursor_blink_period_ms"
            })
        );
        assert!(!blinker.is_running());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_toggles_once_per_period() {
        let (scheduler, blinker) = setup();
        blinker.start(530).unwrap();
        assert!(blinker.visible());

        scheduler.advance(Duration::from_millis(529));
        assert!(blinker.visible());

        scheduler.advance(Duration::from_millis(1));
        assert!(!blinker.visible());

        scheduler.advance(Duration::from_millis(530));
        assert!(blinker.visible());

        assert_eq!(scheduler.fired(), 2);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_stop_resets_visible() {
        let (scheduler, blinker) = setup();
        blinker.start(100).unwrap();
        scheduler.advance(Duration::from_millis(100));
        assert!(!blinker.visible());

        blinker.stop();
        blinker.stop();
        assert!(blinker.visible());
        assert!(!blinker.is_running());
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(Duration::from_millis(1000));
        assert!(blinker.visible());
    }

    #[test]
    fn test_restart_replaces_clock() {
        let (scheduler, blinker) = setup();
        blinker.start(100).unwrap();
        scheduler.advance(Duration::from_millis(50));

        blinker.start(300).unwrap();
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(blinker.period(), Some(Duration::from_millis(300)));

        scheduler.advance(Duration::from_millis(299));
        assert!(blinker.visible());
        scheduler.advance(Duration::from_millis(1));
        assert!(!blinker.visible());
    }

    #[test]
    fn test_effect_can_stop_blinker_mid_toggle() {
        let (scheduler, blinker) = setup();
        let blinker = Rc::new(blinker);
        blinker.start(100).unwrap();

        let weak = Rc::downgrade(&blinker);
        let visible = blinker.visible_signal();
        let stop_effect = effect(move || {
            if !visible.get() {
                if let Some(blinker) = weak.upgrade() {
                    blinker.stop();
                }
            }
        });

        scheduler.advance(Duration::from_millis(100));
        assert!(!blinker.is_running());
        assert!(blinker.visible());
        assert_eq!(scheduler.pending(), 0);

        let fired = scheduler.fired();
        scheduler.advance(Duration::from_secs(10));
        assert_eq!(scheduler.fired(), fired);

        stop_effect();
    }

    #[test]
    fn test_effect_can_restart_blinker_mid_toggle() {
        let (scheduler, blinker) = setup();
        let blinker = Rc::new(blinker);
        blinker.start(100).unwrap();

        let weak = Rc::downgrade(&blinker);
        let visible = blinker.visible_signal();
        let restarted = Rc::new(Cell::new(false));
        let restarted_in_effect = restarted.clone();
        let stop_effect = effect(move || {
            if !visible.get() && !restarted_in_effect.get() {
                restarted_in_effect.set(true);
                if let Some(blinker) = weak.upgrade() {
                    blinker.start(300).unwrap();
                }
            }
        });

        scheduler.advance(Duration::from_millis(100));
        assert!(restarted.get());
        assert!(blinker.visible());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(blinker.period(), Some(Duration::from_millis(300)));

        // The old 100ms clock is gone.
        scheduler.advance(Duration::from_millis(299));
        assert!(blinker.visible());
        scheduler.advance(Duration::from_millis(1));
        assert!(!blinker.visible());
        assert_eq!(scheduler.pending(), 1);

        stop_effect();
    }
}
