//! Hero Example - Typewriter banner in the terminal
//!
//! Types each label, pauses, erases it, and moves on, with a blinking cursor.
//! Quit with Ctrl+C, q, or Esc.
//!
//! Run with: cargo run --example hero -- --label "Rustacean" --label "Builder"
//!
//! Logs go to stderr when SPARK_HERO_LOG is set (e.g. `SPARK_HERO_LOG=debug`).

use clap::Parser;
use spark_hero::{CursorStyle, HeroConfig, mount, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hero")]
#[command(about = "Typewriter hero banner")]
struct Args {
    /// Static text before the animated labels
    #[arg(long)]
    heading: Option<String>,

    /// Label to cycle through (repeatable; default: built-in list)
    #[arg(long = "label", value_name = "TEXT")]
    labels: Vec<String>,

    /// Milliseconds per typed character
    #[arg(long, default_value_t = 100)]
    typing_speed: u64,

    /// Milliseconds a full label stays up
    #[arg(long, default_value_t = 1500)]
    pause: u64,

    /// Milliseconds per erased character
    #[arg(long, default_value_t = 50)]
    erasing_speed: u64,

    /// Cursor blink period in milliseconds
    #[arg(long, default_value_t = 530)]
    blink: u64,

    /// Cursor glyph (default: |)
    #[arg(long)]
    cursor: Option<char>,
}

impl Args {
    fn into_config(self) -> HeroConfig {
        let defaults = HeroConfig::default();
        HeroConfig {
            heading: self.heading.unwrap_or(defaults.heading),
            labels: if self.labels.is_empty() {
                defaults.labels
            } else {
                self.labels
            },
            typing_speed_ms: self.typing_speed,
            pause_duration_ms: self.pause,
            erasing_speed_ms: self.erasing_speed,
            cursor_blink_period_ms: self.blink,
            cursor_style: self.cursor.map_or(defaults.cursor_style, CursorStyle::Custom),
        }
    }
}

fn main() -> spark_hero::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SPARK_HERO_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config();

    let handle = mount(config)?;
    let result = run(&handle);
    handle.unmount();
    result
}
