//! Inline renderer for the hero line.
//!
//! Writes into the normal terminal buffer (no alternate screen). Each render
//! returns to column 0, clears the line, and prints the banner centered in
//! the known terminal width. A line wider than the terminal is cut at the
//! last whole character that fits, so it never wraps. Identical consecutive
//! frames are skipped.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use unicode_width::UnicodeWidthChar;

use crate::hero::HeroFrame;

/// Inline single-line renderer.
pub struct InlineRenderer<W: Write = Stdout> {
    out: W,
    terminal_width: Option<u16>,
    previous: Option<String>,
}

impl InlineRenderer<Stdout> {
    /// Renderer writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for InlineRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> InlineRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            terminal_width: None,
            previous: None,
        }
    }

    /// Width used for centering. `None` renders flush left.
    pub fn set_terminal_width(&mut self, width: Option<u16>) {
        if self.terminal_width != width {
            self.terminal_width = width;
            self.previous = None; // Force redraw
        }
    }

    pub fn terminal_width(&self) -> Option<u16> {
        self.terminal_width
    }

    /// Render a frame. Returns false if it matched the previous one.
    pub fn render(&mut self, frame: &HeroFrame) -> io::Result<bool> {
        let line = frame.line();
        if self.previous.as_deref() == Some(line.as_str()) {
            return Ok(false);
        }

        let column = self.column_for(frame.width());
        let visible = match self.terminal_width {
            Some(width) => fit_to_width(&line, width as usize),
            None => line.as_str(),
        };
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            MoveToColumn(column),
            Print(visible)
        )?;
        self.out.flush()?;

        self.previous = Some(line);
        Ok(true)
    }

    /// Leave the last frame on screen and move below it.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.previous.take().is_some() {
            queue!(self.out, Print("\r\n"))?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn column_for(&self, line_width: usize) -> u16 {
        match self.terminal_width {
            Some(width) if (width as usize) > line_width => ((width as usize - line_width) / 2) as u16,
            _ => 0,
        }
    }
}

/// Longest prefix of `line` that fits in `width` columns.
fn fit_to_width(line: &str, width: usize) -> &str {
    let mut used = 0;
    for (index, ch) in line.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &line[..index];
        }
    }
    line
}

// =============================================================================
// Tests
// =============================================================================
