//! Typewriter engine - drives the state machine from a scheduler.
//!
//! The engine holds at most one pending callback. Each firing callback
//! consumes itself, advances exactly one step, publishes the new text to its
//! signals, and arms its successor. `stop` and `reconfigure` cancel the
//! pending callback before touching state; a callback that slips through
//! anyway carries a stale generation and is dropped.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_hero::scheduler::ManualScheduler;
//! use spark_hero::typewriter::{TypewriterConfig, TypewriterEngine};
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let engine = TypewriterEngine::new(scheduler.clone());
//! engine.start(TypewriterConfig::with_labels(["Rustacean"]))?;
//!
//! scheduler.advance(std::time::Duration::from_millis(300));
//! assert_eq!(engine.revealed(), "Rus");
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use super::config::{Script, TypewriterConfig};
use super::machine::{self, TypewriterState};
use crate::error::ConfigError;
use crate::scheduler::{Scheduler, TimerSlot};
use crate::types::Phase;

struct Run {
    config: TypewriterConfig,
    script: Script,
    state: TypewriterState,
}

struct EngineCore {
    timer: TimerSlot,
    running: Cell<bool>,
    run: RefCell<Option<Run>>,
    revealed: Signal<String>,
    phase: Signal<Phase>,
}

/// Cycles through labels, typing and erasing them one grapheme at a time.
pub struct TypewriterEngine {
    core: Rc<EngineCore>,
}

impl TypewriterEngine {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            core: Rc::new(EngineCore {
                timer: TimerSlot::new(scheduler),
                running: Cell::new(false),
                run: RefCell::new(None),
                revealed: signal(String::new()),
                phase: signal(Phase::Typing),
            }),
        }
    }

    /// Validate `config`, reset to the first label, and schedule the first
    /// transition. Restarts from scratch if already running.
    pub fn start(&self, config: TypewriterConfig) -> Result<(), ConfigError> {
        let script = Script::new(&config)?;
        debug!(labels = config.labels.len(), "typewriter start");
        self.core.restart(config, script);
        Ok(())
    }

    /// Cancel the pending transition. Text stays where it was. Idempotent.
    pub fn stop(&self) {
        if !self.core.running.replace(false) {
            return;
        }
        self.core.timer.cancel();
        debug!("typewriter stop");
    }

    /// Swap in a new configuration.
    ///
    /// Validation happens first; an invalid config leaves the engine exactly
    /// as it was. A running engine with a different config cancels its
    /// pending transition and restarts from the first label. An identical
    /// config, or a stopped engine, changes nothing.
    pub fn reconfigure(&self, config: TypewriterConfig) -> Result<(), ConfigError> {
        let script = Script::new(&config)?;
        if !self.is_running() {
            trace!("typewriter reconfigure ignored while stopped");
            return Ok(());
        }
        let unchanged = self
            .core
            .run
            .borrow()
            .as_ref()
            .is_some_and(|run| run.config == config);
        if unchanged {
            return Ok(());
        }
        debug!(labels = config.labels.len(), "typewriter reconfigure");
        self.core.restart(config, script);
        Ok(())
    }

    pub fn set_labels<I, S>(&self, labels: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|config| config.labels = labels.into_iter().map(Into::into).collect())
    }

    pub fn set_typing_speed_ms(&self, ms: u64) -> Result<(), ConfigError> {
        self.update(|config| config.typing_speed_ms = ms)
    }

    pub fn set_pause_duration_ms(&self, ms: u64) -> Result<(), ConfigError> {
        self.update(|config| config.pause_duration_ms = ms)
    }

    pub fn set_erasing_speed_ms(&self, ms: u64) -> Result<(), ConfigError> {
        self.update(|config| config.erasing_speed_ms = ms)
    }

    fn update(&self, edit: impl FnOnce(&mut TypewriterConfig)) -> Result<(), ConfigError> {
        let Some(mut config) = self.config() else {
            return Ok(());
        };
        edit(&mut config);
        self.reconfigure(config)
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.core.running.get()
    }

    /// Text currently shown.
    pub fn revealed(&self) -> String {
        self.core.revealed.get()
    }

    pub fn phase(&self) -> Phase {
        self.core.phase.get()
    }

    pub fn label_index(&self) -> usize {
        self.state().map(|s| s.label_index).unwrap_or(0)
    }

    pub fn state(&self) -> Option<TypewriterState> {
        self.core.run.borrow().as_ref().map(|run| run.state)
    }

    /// Configuration of the current (or last) run.
    pub fn config(&self) -> Option<TypewriterConfig> {
        self.core.run.borrow().as_ref().map(|run| run.config.clone())
    }

    /// Reactive view of the revealed text, for effects and deriveds.
    pub fn revealed_signal(&self) -> Signal<String> {
        self.core.revealed.clone()
    }

    pub fn phase_signal(&self) -> Signal<Phase> {
        self.core.phase.clone()
    }
}

impl Drop for TypewriterEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl EngineCore {
    fn restart(self: &Rc<Self>, config: TypewriterConfig, script: Script) {
        // Cancel before mutate: nothing armed for the old config survives.
        self.timer.cancel();
        let first = machine::initial(&script);
        *self.run.borrow_mut() = Some(Run {
            config,
            script,
            state: first.state,
        });
        self.running.set(true);
        let generation = self.timer.generation();
        self.publish();
        if self.still_current(generation) {
            self.arm(first.delay);
        }
    }

    fn arm(self: &Rc<Self>, delay: Duration) {
        let core = Rc::downgrade(self);
        let generation = self.timer.generation();
        self.timer.arm(
            delay,
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    core.on_tick(generation);
                }
            }),
        );
    }

    fn on_tick(self: &Rc<Self>, generation: u64) {
        if !self.timer.consume(generation) {
            trace!(generation, "stale typewriter tick dropped");
            return;
        }

        let delay = {
            let mut run = self.run.borrow_mut();
            let Some(run) = run.as_mut() else {
                return;
            };
            let next = machine::step(&run.state, &run.script);
            trace!(
                label = run.state.label_index,
                revealed = next.state.revealed_len,
                phase = ?next.state.phase,
                "typewriter tick"
            );
            run.state = next.state;
            next.delay
        };

        self.publish();

        // Render effects run inside publish and may have stopped or restarted us.
        if self.still_current(generation) {
            self.arm(delay);
        }
    }

    fn still_current(&self, generation: u64) -> bool {
        self.running.get() && self.timer.generation() == generation
    }

    fn publish(&self) {
        let (text, phase) = {
            let run = self.run.borrow();
            let Some(run) = run.as_ref() else {
                return;
            };
            (run.state.revealed(&run.script).to_string(), run.state.phase)
        };
        if self.revealed.get() != text {
            self.revealed.set(text);
        }
        if self.phase.get() != phase {
            self.phase.set(phase);
        }
    }
}
