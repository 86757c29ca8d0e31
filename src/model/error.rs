//! Error types for splashfx.
//!
//! The animation core has no error paths: empty strings, empty block lists and
//! zero-length blocks are defined behaviour. Errors only come from the shell:
//! configuration, logging setup and the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`](crate::config::ConfigError) - unreadable, unparsable or invalid config
//!   - [`LoggingError`](crate::logging::LoggingError) - log file setup failures
//!   - [`TuiError`](crate::view::TuiError) - terminal I/O failures

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Every variant is fatal: the terminal is restored and the process exits.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, rendering or teardown failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}
