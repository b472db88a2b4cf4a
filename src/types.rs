//! Core types shared across the hero banner.

// =============================================================================
// PHASE
// =============================================================================

/// Which part of the typewriter cycle the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Revealing the current label one grapheme per tick.
    #[default]
    Typing,
    /// Label fully shown; the next tick flips to erasing.
    Pausing,
    /// Removing one grapheme per tick; advances to the next label at empty.
    Erasing,
}

// =============================================================================
// CURSOR STYLE
// =============================================================================

/// Glyph drawn after the revealed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Full block
    Block,
    /// Vertical bar (|)
    #[default]
    Bar,
    /// Underscore (_)
    Underline,
    /// Any other single character
    Custom(char),
}

impl CursorStyle {
    /// Character drawn while the cursor is visible.
    pub fn glyph(self) -> char {
        match self {
            CursorStyle::Block => '\u{2588}',
            CursorStyle::Bar => '|',
            CursorStyle::Underline => '_',
            CursorStyle::Custom(ch) => ch,
        }
    }
}

// =============================================================================
// RENDER OUTPUT
// =============================================================================

/// What the hosting view needs to draw the animated part of the banner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOutput {
    pub revealed: String,
    pub cursor_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_default_is_typing() {
        assert_eq!(Phase::default(), Phase::Typing);
    }

    #[test]
    fn test_cursor_glyphs() {
        assert_eq!(CursorStyle::default().glyph(), '|');
        assert_eq!(CursorStyle::Underline.glyph(), '_');
        assert_eq!(CursorStyle::Block.glyph(), '\u{2588}');
        assert_eq!(CursorStyle::Custom('>').glyph(), '>');
    }
}
