//! Terminal Pipeline
//!
//! Connects the hero view to the terminal:
//!
//! ```text
//! RealtimeScheduler → TypewriterEngine / CursorBlinker → signals → render effect → InlineRenderer
//! ```
//!
//! - **Timers** fire from the loop in [`mount::tick`], never from another thread
//! - **Side effects** live in the one render effect installed by the view

pub mod mount;

pub use mount::{mount, run, tick, unmount, MountHandle};
