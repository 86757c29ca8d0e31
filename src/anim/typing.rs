//! Two-phase typing simulation.
//!
//! Each cycle clears both lines, waits, types the input string with a slower
//! randomized cadence, pauses, types the output string with a faster randomized
//! cadence, then dwells on the finished state.

use super::{after, char_len, char_prefix};
use crate::schedule::{Animator, Wake};
use rand::{Rng, RngCore};
use std::time::Duration;
use tracing::trace;

/// Half-open range `[min, max)` of per-character delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    /// Inclusive lower bound.
    pub min: Duration,
    /// Exclusive upper bound.
    pub max: Duration,
}

impl DelayRange {
    /// Range from millisecond bounds.
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    /// Draw a delay uniformly from the range. A degenerate range yields `min`.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Duration {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }
}

/// Pacing for [`TypingSimulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    /// Pause after clearing, before input typing starts.
    pub lead: Duration,
    /// Per-character delay while typing the input.
    pub input_delay: DelayRange,
    /// Pause between the input and output phases.
    pub pause: Duration,
    /// Per-character delay while typing the output.
    pub output_delay: DelayRange,
    /// Hold on the finished state before the next cycle.
    pub dwell: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            lead: Duration::from_millis(800),
            input_delay: DelayRange::from_millis(120, 170),
            pause: Duration::from_millis(1000),
            output_delay: DelayRange::from_millis(80, 110),
            dwell: Duration::from_millis(4000),
        }
    }
}

/// What the simulation is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Mounted, not yet resumed.
    Idle,
    /// Both lines cleared, waiting out the lead pause.
    Lead,
    /// Typing the input line.
    Input,
    /// Input complete, waiting before output starts.
    Pause,
    /// Typing the output line.
    Output,
    /// Both lines complete, holding.
    Dwell,
}

/// Input/output typing state.
#[derive(Debug, Clone)]
pub struct TypingSimulation {
    input: String,
    output: String,
    input_len: usize,
    output_len: usize,
    timings: TypingTimings,
    phase: TypingPhase,
    input_visible: usize,
    output_visible: usize,
    cycles: u64,
}

impl TypingSimulation {
    /// Simulate typing `input` and then `output`.
    pub fn new(input: impl Into<String>, output: impl Into<String>, timings: TypingTimings) -> Self {
        let input = input.into();
        let output = output.into();
        Self {
            input_len: char_len(&input),
            output_len: char_len(&output),
            input,
            output,
            timings,
            phase: TypingPhase::Idle,
            input_visible: 0,
            output_visible: 0,
            cycles: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Visible characters of the input line.
    pub fn input_visible(&self) -> usize {
        self.input_visible
    }

    /// Visible characters of the output line.
    pub fn output_visible(&self) -> usize {
        self.output_visible
    }

    /// Input text typed so far.
    pub fn input_text(&self) -> &str {
        char_prefix(&self.input, self.input_visible)
    }

    /// Output text typed so far.
    pub fn output_text(&self) -> &str {
        char_prefix(&self.output, self.output_visible)
    }

    /// Full input string.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Full output string.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn start_cycle(&mut self, now: Duration) -> Wake {
        self.input_visible = 0;
        self.output_visible = 0;
        self.cycles += 1;
        self.phase = TypingPhase::Lead;
        trace!(cycle = self.cycles, "typing simulation cycle started");
        Wake::At(after(now, self.timings.lead))
    }

    fn begin_input(&mut self, now: Duration, rng: &mut dyn RngCore) -> Wake {
        if self.input_len == 0 {
            self.phase = TypingPhase::Pause;
            return Wake::At(after(now, self.timings.pause));
        }
        self.phase = TypingPhase::Input;
        Wake::At(after(now, self.timings.input_delay.sample(rng)))
    }

    fn begin_output(&mut self, now: Duration, rng: &mut dyn RngCore) -> Wake {
        if self.output_len == 0 {
            self.phase = TypingPhase::Dwell;
            return Wake::At(after(now, self.timings.dwell));
        }
        self.phase = TypingPhase::Output;
        Wake::At(after(now, self.timings.output_delay.sample(rng)))
    }
}

impl Animator for TypingSimulation {
    fn resume(&mut self, now: Duration, rng: &mut dyn RngCore) -> Wake {
        match self.phase {
            TypingPhase::Idle | TypingPhase::Dwell => self.start_cycle(now),
            TypingPhase::Lead => self.begin_input(now, rng),
            TypingPhase::Input => {
                self.input_visible += 1;
                if self.input_visible >= self.input_len {
                    self.phase = TypingPhase::Pause;
                    Wake::At(after(now, self.timings.pause))
                } else {
                    Wake::At(after(now, self.timings.input_delay.sample(rng)))
                }
            }
            TypingPhase::Pause => self.begin_output(now, rng),
            TypingPhase::Output => {
                self.output_visible += 1;
                if self.output_visible >= self.output_len {
                    self.phase = TypingPhase::Dwell;
                    Wake::At(after(now, self.timings.dwell))
                } else {
                    Wake::At(after(now, self.timings.output_delay.sample(rng)))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "typing_tests.rs"]
mod tests;
