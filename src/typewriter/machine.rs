//! Typewriter state machine.
//!
//! A pure function from `(state, script)` to `(next state, delay)`. No timers
//! here; the engine feeds the returned delay to the scheduler.
//!
//! | phase   | condition | action                         | next    |
//! |---------|-----------|--------------------------------|---------|
//! | Typing  | n < m     | reveal one more grapheme       | Typing  |
//! | Typing  | n == m    | -                              | Pausing |
//! | Pausing | always    | -                              | Erasing |
//! | Erasing | n > 0     | hide the last grapheme         | Erasing |
//! | Erasing | n == 0    | move to the next label         | Typing  |
//!
//! The delay returned with a state is what the *next* row costs: a typed
//! grapheme costs the typing speed, leaving a full label costs the pause,
//! Pausing -> Erasing is immediate, an erased grapheme costs the erasing
//! speed, and moving to the next label is immediate. One label of length `m`
//! therefore takes exactly `m*typing + pause + m*erasing`.

use std::time::Duration;

use super::config::Script;
use crate::types::Phase;

/// Where the typewriter is. `revealed_len` counts graphemes of the current
/// label, so the shown text is always a prefix of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypewriterState {
    pub label_index: usize,
    pub revealed_len: usize,
    pub phase: Phase,
}

impl TypewriterState {
    /// Text currently on screen.
    pub fn revealed<'a>(&self, script: &'a Script) -> &'a str {
        script.label(self.label_index).prefix(self.revealed_len)
    }
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: TypewriterState,
    /// Wait before the next transition.
    pub delay: Duration,
}

/// Starting point: first label, nothing shown, typing.
pub fn initial(script: &Script) -> Step {
    let state = TypewriterState::default();
    Step {
        delay: cost(&state, script),
        state,
    }
}

/// Advance exactly one row of the transition table.
pub fn step(state: &TypewriterState, script: &Script) -> Step {
    let len = script.label(state.label_index).len();
    let n = state.revealed_len.min(len);

    let next = match state.phase {
        Phase::Typing if n < len => TypewriterState {
            revealed_len: n + 1,
            ..*state
        },
        Phase::Typing => TypewriterState {
            revealed_len: n,
            phase: Phase::Pausing,
            ..*state
        },
        Phase::Pausing => TypewriterState {
            revealed_len: n,
            phase: Phase::Erasing,
            ..*state
        },
        Phase::Erasing if n > 0 => TypewriterState {
            revealed_len: n - 1,
            ..*state
        },
        Phase::Erasing => TypewriterState {
            label_index: (state.label_index + 1) % script.label_count(),
            revealed_len: 0,
            phase: Phase::Typing,
        },
    };

    Step {
        delay: cost(&next, script),
        state: next,
    }
}

/// Delay before `state` takes its next step.
fn cost(state: &TypewriterState, script: &Script) -> Duration {
    let len = script.label(state.label_index).len();
    match state.phase {
        Phase::Typing if state.revealed_len < len => script.typing,
        Phase::Typing => script.pause,
        Phase::Pausing => Duration::ZERO,
        Phase::Erasing if state.revealed_len > 0 => script.erasing,
        Phase::Erasing => Duration::ZERO,
    }
}
