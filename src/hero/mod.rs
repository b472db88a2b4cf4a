//! Hero banner - hosting view for the typewriter and the blinking cursor.
//!
//! [`HeroView`] owns a [`TypewriterEngine`] and a [`CursorBlinker`], starts
//! both on mount, stops both on unmount, and installs ONE render effect that
//! hands a fresh [`HeroFrame`] to the sink whenever the revealed text, the
//! cursor phase, the heading or the cursor style changes.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_hero::hero::{HeroConfig, HeroView};
//! use spark_hero::scheduler::ManualScheduler;
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let mut hero = HeroView::new(scheduler.clone(), HeroConfig::default())?;
//! hero.mount(|frame| println!("{}", frame.line()))?;
//!
//! scheduler.advance(std::time::Duration::from_secs(1));
//!
//! hero.unmount();
//! ```

use std::rc::Rc;

use spark_signals::{effect, signal, Signal};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::ConfigError;
use crate::scheduler::Scheduler;
use crate::state::blink::{CursorBlinker, DEFAULT_BLINK_PERIOD_MS};
use crate::typewriter::{
    DEFAULT_ERASING_SPEED_MS, DEFAULT_LABELS, DEFAULT_PAUSE_DURATION_MS, DEFAULT_TYPING_SPEED_MS,
    TypewriterConfig, TypewriterEngine,
};
use crate::types::{CursorStyle, RenderOutput};

pub const DEFAULT_HEADING: &str = "Hi I'm Prabhas";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Everything the display layer passes to the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroConfig {
    /// Static text before the animated part
    pub heading: String,
    pub labels: Vec<String>,
    pub typing_speed_ms: u64,
    pub pause_duration_ms: u64,
    pub erasing_speed_ms: u64,
    /// Cursor toggle period (default: 530)
    pub cursor_blink_period_ms: u64,
    pub cursor_style: CursorStyle,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            pause_duration_ms: DEFAULT_PAUSE_DURATION_MS,
            erasing_speed_ms: DEFAULT_ERASING_SPEED_MS,
            cursor_blink_period_ms: DEFAULT_BLINK_PERIOD_MS,
            cursor_style: CursorStyle::default(),
        }
    }
}

impl HeroConfig {
    /// The typewriter part of the configuration.
    pub fn typewriter(&self) -> TypewriterConfig {
        TypewriterConfig {
            labels: self.labels.clone(),
            typing_speed_ms: self.typing_speed_ms,
            pause_duration_ms: self.pause_duration_ms,
            erasing_speed_ms: self.erasing_speed_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.typewriter().validate()?;
        if self.cursor_blink_period_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "cursor_blink_period_ms",
            });
        }
        Ok(())
    }
}

// =============================================================================
// FRAME
// =============================================================================

/// One rendered state of the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFrame {
    pub heading: String,
    pub revealed: String,
    pub cursor_visible: bool,
    pub cursor: CursorStyle,
}

impl HeroFrame {
    /// The animated part only.
    pub fn output(&self) -> RenderOutput {
        RenderOutput {
            revealed: self.revealed.clone(),
            cursor_visible: self.cursor_visible,
        }
    }

    /// `"<heading> <revealed><cursor>"`. A hidden cursor becomes blank space
    /// of the same width so the line does not jitter.
    pub fn line(&self) -> String {
        let glyph = self.cursor.glyph();
        let mut line = String::with_capacity(self.heading.len() + self.revealed.len() + 2);
        if !self.heading.is_empty() {
            line.push_str(&self.heading);
            line.push(' ');
        }
        line.push_str(&self.revealed);
        if self.cursor_visible {
            line.push(glyph);
        } else {
            let width = glyph.width().unwrap_or(1).max(1);
            line.extend(std::iter::repeat_n(' ', width));
        }
        line
    }

    /// Display width of [`HeroFrame::line`] in terminal columns.
    pub fn width(&self) -> usize {
        self.line().width()
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// Hosting view: lifecycle glue between config, animation, and a renderer.
pub struct HeroView {
    config: HeroConfig,
    engine: TypewriterEngine,
    blinker: CursorBlinker,
    heading: Signal<String>,
    cursor_style: Signal<CursorStyle>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl HeroView {
    /// Build the view. Configuration is checked here so a bad config never
    /// reaches mount.
    pub fn new(scheduler: Rc<dyn Scheduler>, config: HeroConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine: TypewriterEngine::new(scheduler.clone()),
            blinker: CursorBlinker::new(scheduler),
            heading: signal(config.heading.clone()),
            cursor_style: signal(config.cursor_style),
            stop_effect: None,
            config,
        })
    }

    /// Start both animations and render every change into `sink`.
    /// Mounting an already mounted view remounts it with the new sink.
    pub fn mount<F>(&mut self, mut sink: F) -> Result<(), ConfigError>
    where
        F: FnMut(&HeroFrame) + 'static,
    {
        self.unmount();

        self.engine.start(self.config.typewriter())?;
        if let Err(err) = self.blinker.start(self.config.cursor_blink_period_ms) {
            self.engine.stop();
            return Err(err);
        }

        let heading = self.heading.clone();
        let cursor_style = self.cursor_style.clone();
        let revealed = self.engine.revealed_signal();
        let visible = self.blinker.visible_signal();

        let stop = effect(move || {
            let frame = HeroFrame {
                heading: heading.get(),
                revealed: revealed.get(),
                cursor_visible: visible.get(),
                cursor: cursor_style.get(),
            };
            sink(&frame);
        });
        self.stop_effect = Some(Box::new(stop));

        debug!(heading = %self.config.heading, "hero mounted");
        Ok(())
    }

    /// Stop rendering, then stop both animations. Idempotent.
    pub fn unmount(&mut self) {
        let Some(stop) = self.stop_effect.take() else {
            return;
        };
        stop();
        self.engine.stop();
        self.blinker.stop();
        debug!("hero unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.stop_effect.is_some()
    }

    /// Apply new settings. Validates first; on error nothing changes.
    ///
    /// Typewriter changes restart the typewriter, a new blink period restarts
    /// the blinker, and heading / cursor style changes just re-render.
    pub fn reconfigure(&mut self, config: HeroConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if self.is_mounted() {
            self.engine.reconfigure(config.typewriter())?;
            if config.cursor_blink_period_ms != self.config.cursor_blink_period_ms {
                self.blinker.start(config.cursor_blink_period_ms)?;
            }
        }
        if self.heading.get() != config.heading {
            self.heading.set(config.heading.clone());
        }
        if self.cursor_style.get() != config.cursor_style {
            self.cursor_style.set(config.cursor_style);
        }

        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn engine(&self) -> &TypewriterEngine {
        &self.engine
    }

    pub fn blinker(&self) -> &CursorBlinker {
        &self.blinker
    }

    /// Current frame, read without side effects.
    pub fn frame(&self) -> HeroFrame {
        HeroFrame {
            heading: self.heading.get(),
            revealed: self.engine.revealed(),
            cursor_visible: self.blinker.visible(),
            cursor: self.cursor_style.get(),
        }
    }
}

impl Drop for HeroView {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// TESTS
// =============================================================================
