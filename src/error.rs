//! Error types.
//!
//! Configuration is the only thing that can go wrong inside the animation
//! core, and it is reported synchronously from `start` / `reconfigure`.
//! Ticks never fail. The terminal surface adds I/O on top.

use std::io;

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The label sequence has no elements.
    #[error("label sequence must contain at least one label")]
    EmptyLabels,
    /// A speed or period that must be positive was zero.
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Crate-level error for the terminal surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal i/o: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
