//! Timed text animators (pure core).
//!
//! Three independent, self-restarting animations:
//!
//! - [`ScrambleText`]: left-to-right lock-in over randomized decoy glyphs,
//!   a pure function of `now mod cycle`.
//! - [`SequentialReveal`]: typewriter over an ordered list of text blocks.
//! - [`TypingSimulation`]: simulated input followed by simulated output with
//!   randomized per-character pacing.
//!
//! Each implements [`Animator`](crate::schedule::Animator) and is mounted as a
//! [`Task`](crate::schedule::Task). They share no state with each other.

pub mod scramble;
pub mod sequential;
pub mod typing;

pub use scramble::{ScramblePhase, ScrambleText, ScrambleTimings};
pub use sequential::{SequentialReveal, SequentialStep, SequentialTimings};
pub use typing::{DelayRange, TypingPhase, TypingSimulation, TypingTimings};

use std::time::Duration;

/// Shortest wait an animator will ever request.
///
/// Keeps a zero-length configured pause from turning into a busy loop on the
/// same instant.
pub const MIN_WAIT: Duration = Duration::from_millis(1);

/// Deadline `delay` after `now`, never earlier than [`MIN_WAIT`].
pub(crate) fn after(now: Duration, delay: Duration) -> Duration {
    now + delay.max(MIN_WAIT)
}

/// Number of chars in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Prefix of `text` holding its first `count` chars.
pub fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
