//! Character-scramble reveal.
//!
//! A fixed target string locks in left to right during the first `reveal` of
//! every `cycle`; unlocked positions show random decoy glyphs. The rest of the
//! cycle holds the finished text without redrawing.
//!
//! State is a pure function of `now mod cycle`, so the animation cannot drift and
//! restarts identically every cycle.

use super::MIN_WAIT;
use crate::schedule::{Animator, Wake};
use rand::{Rng, RngCore};
use std::time::Duration;
use tracing::trace;
use unicode_width::UnicodeWidthChar;

/// Decoys for single-width positions.
pub const NARROW_DECOYS: &[char] = &[
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '=', '+', '*', '^', '?', '#', '%',
];

/// Decoys for double-width positions (full-width forms), so the line keeps its width.
pub const WIDE_DECOYS: &[char] = &[
    '！', '＜', '＞', '－', '＿', '＼', '／', '［', '］', '｛', '｝', '＝', '＋', '＊', '＾', '？',
    '＃', '％',
];

/// Cycle timing for [`ScrambleText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleTimings {
    /// Full cycle length.
    pub cycle: Duration,
    /// Window at the start of each cycle during which characters lock in.
    pub reveal: Duration,
}

impl Default for ScrambleTimings {
    fn default() -> Self {
        Self {
            cycle: Duration::from_millis(8000),
            reveal: Duration::from_millis(4000),
        }
    }
}

/// Where in its cycle a scramble currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScramblePhase {
    /// Characters are locking in; unlocked positions change every frame.
    Scrambling,
    /// Everything is locked; nothing changes until the next cycle.
    Held,
}

/// Number of locked characters `elapsed` into a cycle.
///
/// Index `i` locks once `elapsed >= (i + 1) * reveal / len`, so this is
/// `min(len, floor(elapsed * len / reveal))`, computed in integer nanoseconds.
pub fn locked_count(elapsed: Duration, reveal: Duration, len: usize) -> usize {
    if elapsed >= reveal {
        return len;
    }
    let locked = elapsed.as_nanos() * len as u128 / reveal.as_nanos();
    usize::try_from(locked).unwrap_or(len).min(len)
}

/// Phase `elapsed` into a cycle. An empty target is always held.
pub fn phase_at(elapsed: Duration, reveal: Duration, len: usize) -> ScramblePhase {
    if len > 0 && elapsed < reveal {
        ScramblePhase::Scrambling
    } else {
        ScramblePhase::Held
    }
}

/// Scramble-reveal state for one target string.
#[derive(Debug, Clone)]
pub struct ScrambleText {
    target: String,
    chars: Vec<char>,
    timings: ScrambleTimings,
    phase: ScramblePhase,
    locked: usize,
    display: String,
    refreshes: u64,
}

impl ScrambleText {
    /// New animator for `target`. The target never changes for the instance's life;
    /// a different target means a new instance.
    pub fn new(target: impl Into<String>, timings: ScrambleTimings) -> Self {
        let target = target.into();
        let chars: Vec<char> = target.chars().collect();
        let cycle = timings.cycle.max(MIN_WAIT);
        let timings = ScrambleTimings {
            cycle,
            reveal: timings.reveal.min(cycle),
        };
        Self {
            target,
            chars,
            timings,
            phase: ScramblePhase::Scrambling,
            locked: 0,
            display: String::new(),
            refreshes: 0,
        }
    }

    /// The string being revealed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Effective timings (cycle clamped to at least 1ms, reveal to at most cycle).
    pub fn timings(&self) -> ScrambleTimings {
        self.timings
    }

    /// Phase as of the last resume.
    pub fn phase(&self) -> ScramblePhase {
        self.phase
    }

    /// Locked characters as of the last resume.
    pub fn locked(&self) -> usize {
        self.locked
    }

    /// Whether character `index` showed its true value at the last resume.
    pub fn is_locked(&self, index: usize) -> bool {
        index < self.locked
    }

    /// Text shown at the last resume.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// How many times the display string has been regenerated.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Offset of `now` into the current cycle.
    pub fn elapsed_in_cycle(&self, now: Duration) -> Duration {
        let offset = now.as_nanos() % self.timings.cycle.as_nanos();
        Duration::from_nanos(u64::try_from(offset).unwrap_or(0))
    }

    fn compose(&self, locked: usize, rng: &mut dyn RngCore) -> String {
        self.chars
            .iter()
            .enumerate()
            .map(|(i, &c)| if i < locked { c } else { decoy_for(c, rng) })
            .collect()
    }
}

/// Random decoy matching the display width of `c`.
fn decoy_for(c: char, rng: &mut dyn RngCore) -> char {
    let alphabet = if c.width() == Some(2) {
        WIDE_DECOYS
    } else {
        NARROW_DECOYS
    };
    alphabet[rng.gen_range(0..alphabet.len())]
}

impl Animator for ScrambleText {
    fn resume(&mut self, now: Duration, rng: &mut dyn RngCore) -> Wake {
        let elapsed = self.elapsed_in_cycle(now);
        let len = self.chars.len();
        let phase = phase_at(elapsed, self.timings.reveal, len);

        match phase {
            ScramblePhase::Scrambling => {
                if self.phase == ScramblePhase::Held {
                    trace!(target_text = %self.target, "scramble cycle restarted");
                }
                self.locked = locked_count(elapsed, self.timings.reveal, len);
                self.display = self.compose(self.locked, rng);
                self.refreshes += 1;
                self.phase = phase;
                Wake::Frame
            }
            ScramblePhase::Held => {
                if self.phase != ScramblePhase::Held || self.display != self.target {
                    self.locked = len;
                    self.display.clone_from(&self.target);
                    self.refreshes += 1;
                }
                self.phase = phase;
                Wake::At(now - elapsed + self.timings.cycle)
            }
        }
    }
}

#[cfg(test)]
#[path = "scramble_tests.rs"]
mod tests;
