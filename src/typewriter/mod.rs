//! Typewriter headline animation.
//!
//! - [`config`] - host settings, grapheme-split labels, validated [`Script`]
//! - [`machine`] - pure transition function
//! - [`engine`] - timer-driven [`TypewriterEngine`]

pub mod config;
pub mod engine;
pub mod machine;

pub use config::{
    DEFAULT_ERASING_SPEED_MS, DEFAULT_LABELS, DEFAULT_PAUSE_DURATION_MS, DEFAULT_TYPING_SPEED_MS,
    Label, Script, TypewriterConfig,
};
pub use engine::TypewriterEngine;
pub use machine::{Step, TypewriterState, initial, step};
