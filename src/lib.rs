//! # spark-hero
//!
//! Typewriter hero banner for reactive terminal UIs.
//!
//! Built on [spark-signals](https://crates.io/crates/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Two independent animations share one host scheduler:
//!
//! ```text
//! Scheduler ─┬─ TypewriterEngine ── revealed: Signal<String> ─┐
//!            └─ CursorBlinker ───── visible:  Signal<bool>  ──┴─ render effect → sink
//! ```
//!
//! Each animation keeps at most one pending timer and re-arms it from inside
//! the firing callback. Stopping or reconfiguring cancels that timer before
//! any state changes, and a generation guard drops anything already in
//! flight.
//!
//! ## Modules
//!
//! - [`scheduler`] - Scheduler trait, manual and real-time implementations, TimerSlot
//! - [`typewriter`] - Label cycling state machine and engine
//! - [`state`] - Cursor blink clock
//! - [`hero`] - Hosting view composing both into frames
//! - [`renderer`] - Inline terminal renderer
//! - [`pipeline`] - mount / tick / run lifecycle

pub mod error;
pub mod hero;
pub mod pipeline;
pub mod renderer;
pub mod scheduler;
pub mod state;
pub mod typewriter;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ConfigError, Error, Result};

pub use scheduler::{ManualScheduler, RealtimeScheduler, Scheduler, TimerHandle, TimerSlot};

pub use typewriter::{TypewriterConfig, TypewriterEngine, TypewriterState};

pub use state::{CursorBlinker, DEFAULT_BLINK_PERIOD_MS};

pub use hero::{HeroConfig, HeroFrame, HeroView};

pub use renderer::InlineRenderer;

pub use pipeline::{mount, run, tick, unmount, MountHandle};
