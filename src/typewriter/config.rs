//! Typewriter configuration and its validated form.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ConfigError;

pub const DEFAULT_TYPING_SPEED_MS: u64 = 100;
pub const DEFAULT_PAUSE_DURATION_MS: u64 = 1500;
pub const DEFAULT_ERASING_SPEED_MS: u64 = 50;

/// Labels shown when the host supplies none.
pub const DEFAULT_LABELS: [&str; 5] = [
    "AI & ML Student",
    "Tech Enthusiast",
    "Vibe Coder",
    "Creator",
    "Freelancer",
];

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Host-facing typewriter settings. All durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Labels cycled in order. Must not be empty; empty strings are fine.
    pub labels: Vec<String>,
    /// Delay before each typed grapheme (default: 100)
    pub typing_speed_ms: u64,
    /// Time a fully typed label stays up before erasing (default: 1500)
    pub pause_duration_ms: u64,
    /// Delay before each erased grapheme (default: 50)
    pub erasing_speed_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            pause_duration_ms: DEFAULT_PAUSE_DURATION_MS,
            erasing_speed_ms: DEFAULT_ERASING_SPEED_MS,
        }
    }
}

impl TypewriterConfig {
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Script::new(self).map(|_| ())
    }
}

// =============================================================================
// LABEL
// =============================================================================

/// A label split at grapheme boundaries, so prefixes never cut a
/// multi-codepoint character in half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    /// Byte offset after each grapheme; `ends[i]` closes the (i+1)-th.
    ends: Vec<usize>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self { text, ends }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in graphemes.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// First `n` graphemes (clamped to the label length).
    pub fn prefix(&self, n: usize) -> &str {
        match n.min(self.len()) {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }
}

// =============================================================================
// SCRIPT
// =============================================================================

/// Validated configuration the state machine runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    labels: Vec<Label>,
    pub(crate) typing: Duration,
    pub(crate) pause: Duration,
    pub(crate) erasing: Duration,
}

impl Script {
    pub fn new(config: &TypewriterConfig) -> Result<Self, ConfigError> {
        if config.labels.is_empty() {
            return Err(ConfigError::EmptyLabels);
        }
        if config.typing_speed_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "typing_speed_ms" });
        }
        if config.erasing_speed_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "erasing_speed_ms" });
        }

        Ok(Self {
            labels: config.labels.iter().map(Label::new).collect(),
            typing: Duration::from_millis(config.typing_speed_ms),
            pause: Duration::from_millis(config.pause_duration_ms),
            erasing: Duration::from_millis(config.erasing_speed_ms),
        })
    }

    /// Label at `index`, wrapping around the sequence.
    pub fn label(&self, index: usize) -> &Label {
        &self.labels[index % self.labels.len()]
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

impl TryFrom<&TypewriterConfig> for Script {
    type Error = ConfigError;

    fn try_from(config: &TypewriterConfig) -> Result<Self, Self::Error> {
        Script::new(config)
    }
}
