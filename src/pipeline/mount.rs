//! Mount API - Terminal lifecycle and event loop.
//!
//! Puts the terminal in raw mode, mounts a [`HeroView`] on a
//! [`RealtimeScheduler`] with an [`InlineRenderer`] as its sink, and drives
//! timers and input from a single loop.
//!
//! # Example
//!
//! ```ignore
//! use spark_hero::pipeline::mount;
//! use spark_hero::hero::HeroConfig;
//!
//! // Mount the banner
//! let handle = mount::mount(HeroConfig::default())?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&handle)? {
//!     // Your logic here
//! }
//!
//! // Clean up
//! handle.unmount();
//! ```

use std::cell::RefCell;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing::{debug, warn};

use crate::error::Result;
use crate::hero::{HeroConfig, HeroFrame, HeroView};
use crate::renderer::InlineRenderer;
use crate::scheduler::RealtimeScheduler;

/// Longest the loop waits for input before checking timers again (~60fps).
const FRAME: Duration = Duration::from_millis(16);

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds the view, its scheduler, the renderer, and the running flag
/// (cleared on Ctrl+C, `q`, Esc, or [`MountHandle::stop`]).
pub struct MountHandle {
    hero: HeroView,
    scheduler: Rc<RealtimeScheduler>,
    renderer: Rc<RefCell<InlineRenderer>>,
    running: Arc<AtomicBool>,
    restored: bool,
}

impl MountHandle {
    /// Stop the animations and give the terminal back.
    pub fn unmount(mut self) {
        self.shutdown();
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn hero(&self) -> &HeroView {
        &self.hero
    }

    fn shutdown(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        self.running.store(false, Ordering::SeqCst);
        self.hero.unmount();

        if let Err(err) = self.renderer.borrow_mut().finish() {
            warn!(%err, "failed to finish hero line");
        }
        restore_terminal();
        debug!("unmounted");
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the hero banner on the current terminal.
///
/// Configuration is validated before the terminal is touched. Returns a
/// MountHandle for cleanup.
pub fn mount(config: HeroConfig) -> Result<MountHandle> {
    let scheduler = Rc::new(RealtimeScheduler::new());
    let mut hero = HeroView::new(scheduler.clone(), config)?;

    enable_raw_mode()?;
    if let Err(err) = execute!(stdout(), Hide) {
        restore_terminal();
        return Err(err.into());
    }

    let renderer = Rc::new(RefCell::new(InlineRenderer::new()));
    renderer
        .borrow_mut()
        .set_terminal_width(terminal::size().ok().map(|(width, _)| width));

    // The render effect is the only writer to the terminal.
    let sink = renderer.clone();
    let mounted = hero.mount(move |frame| match sink.try_borrow_mut() {
        Ok(mut renderer) => {
            if let Err(err) = renderer.render(frame) {
                warn!(%err, "hero render failed");
            }
        }
        Err(_) => warn!("renderer busy, frame dropped"),
    });
    if let Err(err) = mounted {
        restore_terminal();
        return Err(err.into());
    }

    debug!("mounted");
    Ok(MountHandle {
        hero,
        scheduler,
        renderer,
        running: Arc::new(AtomicBool::new(true)),
        restored: false,
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

fn restore_terminal() {
    let _ = execute!(stdout(), Show);
    let _ = disable_raw_mode();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Fires due timers, then waits for input until the next timer is due (at
/// most one frame).
///
/// # Returns
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested (Ctrl+C / q / Esc pressed or `handle.stop()` called)
/// * `Err(e)` - I/O error while polling
pub fn tick(handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    handle.scheduler.run_due();

    let timeout = handle
        .scheduler
        .next_deadline()
        .map_or(FRAME, |deadline| deadline.min(FRAME));

    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press && is_quit_key(&key) => {
                handle.stop();
            }
            Event::Resize(width, _) => {
                let frame = handle.hero.frame();
                redraw_at_width(&mut *handle.renderer.borrow_mut(), &frame, width);
            }
            _ => {}
        }
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &MountHandle) -> Result<()> {
    while tick(handle)? {
        // Continue processing events
    }
    Ok(())
}

/// Redraw after a resize. A failed write is logged and the loop keeps going.
fn redraw_at_width<W: Write>(renderer: &mut InlineRenderer<W>, frame: &HeroFrame, width: u16) {
    renderer.set_terminal_width(Some(width));
    if let Err(err) = renderer.render(frame) {
        warn!(%err, "hero render failed");
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CursorStyle;
    use crossterm::event::KeyEventState;
    use std::io;

    /// Writer whose every write fails, like a closed terminal.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn frame() -> HeroFrame {
        HeroFrame {
            heading: "Hi".to_string(),
            revealed: "AB".to_string(),
            cursor_visible: true,
            cursor: CursorStyle::Bar,
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_resize_redraws_at_new_width() {
        let mut renderer = InlineRenderer::with_writer(Vec::new());
        redraw_at_width(&mut renderer, &frame(), 20);

        assert_eq!(renderer.terminal_width(), Some(20));
        let out = String::from_utf8_lossy(renderer.writer()).into_owned();
        assert!(out.contains("\x1b[8G"));
        assert!(out.ends_with("Hi AB|"));
    }

    #[test]
    fn test_resize_render_error_is_not_fatal() {
        let mut renderer = InlineRenderer::with_writer(BrokenPipe);
        redraw_at_width(&mut renderer, &frame(), 20);
        assert_eq!(renderer.terminal_width(), Some(20));

        // Still usable for the next resize.
        redraw_at_width(&mut renderer, &frame(), 40);
        assert_eq!(renderer.terminal_width(), Some(40));
    }

    #[test]
    fn test_mount_rejects_invalid_config_before_touching_terminal() {
        let config = HeroConfig {
            labels: Vec::new(),
            ..HeroConfig::default()
        };
        assert!(matches!(
            mount(config),
            Err(crate::error::Error::Config(crate::error::ConfigError::EmptyLabels))
        ));
    }
}
