//! State Module - Runtime state owned by the hero banner
//!
//! - **Blink** - cursor visibility clock, independent of the typewriter

pub mod blink;

pub use blink::{CursorBlinker, DEFAULT_BLINK_PERIOD_MS};
