//! Sequential multi-block typewriter.
//!
//! One pass: reset every block to zero visible characters, wait the lead pause,
//! then reveal each block in order so that every block takes the same total
//! time regardless of its length, pausing between blocks. After the last block
//! the finished text dwells before the next pass starts.

use super::{after, char_len, char_prefix};
use crate::schedule::{Animator, Wake};
use rand::RngCore;
use std::time::Duration;
use tracing::trace;

/// Pacing for [`SequentialReveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequentialTimings {
    /// Pause after the reset, before the first block starts.
    pub lead: Duration,
    /// Total time to reveal one block, independent of its length.
    pub block: Duration,
    /// Pause between consecutive blocks.
    pub gap: Duration,
    /// Hold after the last block before the next pass.
    pub dwell: Duration,
}

impl Default for SequentialTimings {
    fn default() -> Self {
        Self {
            lead: Duration::from_millis(600),
            block: Duration::from_millis(2000),
            gap: Duration::from_millis(500),
            dwell: Duration::from_millis(4500),
        }
    }
}

/// What the reveal is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequentialStep {
    /// Mounted, not yet resumed.
    Idle,
    /// All blocks reset, waiting out the lead pause.
    Lead,
    /// Waiting to reveal the next character of `block`.
    Revealing {
        /// Index of the block being revealed.
        block: usize,
    },
    /// `block` is complete, waiting out the inter-block pause.
    Gap {
        /// Index of the block that just completed.
        block: usize,
    },
    /// Every block is complete, holding before the next pass.
    Dwell,
}

/// Block-by-block reveal state.
#[derive(Debug, Clone)]
pub struct SequentialReveal {
    blocks: Vec<String>,
    lens: Vec<usize>,
    timings: SequentialTimings,
    step: SequentialStep,
    active: Option<usize>,
    visible: Vec<usize>,
    passes: u64,
}

impl SequentialReveal {
    /// Reveal `blocks` in order.
    pub fn new(blocks: Vec<String>, timings: SequentialTimings) -> Self {
        let lens: Vec<usize> = blocks.iter().map(|b| char_len(b)).collect();
        let visible = vec![0; blocks.len()];
        Self {
            blocks,
            lens,
            timings,
            step: SequentialStep::Idle,
            active: None,
            visible,
            passes: 0,
        }
    }

    /// The blocks, in reveal order.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Current step of the state machine.
    pub fn step(&self) -> SequentialStep {
        self.step
    }

    /// Index of the active block. `None` before the first block of a pass starts.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Visible character count for each block.
    pub fn visible_counts(&self) -> &[usize] {
        &self.visible
    }

    /// Visible prefix of block `index` (empty for out-of-range indices).
    pub fn visible_text(&self, index: usize) -> &str {
        match (self.blocks.get(index), self.visible.get(index)) {
            (Some(block), Some(&count)) => char_prefix(block, count),
            _ => "",
        }
    }

    /// Whether the active index has reached block `index` in this pass.
    ///
    /// Unreached blocks are drawn de-emphasized.
    pub fn is_reached(&self, index: usize) -> bool {
        self.active.is_some_and(|active| index <= active)
    }

    /// Whether block `index` is mid-reveal (shows a trailing caret).
    pub fn is_revealing(&self, index: usize) -> bool {
        matches!(self.step, SequentialStep::Revealing { block } if block == index)
    }

    /// Number of passes started so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Delay between two characters of `block`; the whole block spans `timings.block`.
    fn char_delay(&self, block: usize) -> Duration {
        let len = u32::try_from(self.lens[block]).unwrap_or(u32::MAX).max(1);
        self.timings.block / len
    }

    fn start_pass(&mut self, now: Duration) -> Wake {
        self.visible.fill(0);
        self.active = None;
        self.passes += 1;
        self.step = SequentialStep::Lead;
        trace!(pass = self.passes, "sequential reveal pass started");
        Wake::At(after(now, self.timings.lead))
    }

    fn enter_block(&mut self, block: usize, now: Duration) -> Wake {
        if block >= self.blocks.len() {
            self.step = SequentialStep::Dwell;
            return Wake::At(after(now, self.timings.dwell));
        }
        self.active = Some(block);
        if self.lens[block] == 0 {
            // nothing to type: complete without dividing by the length
            return self.finish_block(block, now);
        }
        self.step = SequentialStep::Revealing { block };
        Wake::At(after(now, self.char_delay(block)))
    }

    fn finish_block(&mut self, block: usize, now: Duration) -> Wake {
        if block + 1 >= self.blocks.len() {
            self.step = SequentialStep::Dwell;
            Wake::At(after(now, self.timings.dwell))
        } else {
            self.step = SequentialStep::Gap { block };
            Wake::At(after(now, self.timings.gap))
        }
    }
}

impl Animator for SequentialReveal {
    fn resume(&mut self, now: Duration, _rng: &mut dyn RngCore) -> Wake {
        match self.step {
            SequentialStep::Idle | SequentialStep::Dwell => self.start_pass(now),
            SequentialStep::Lead => self.enter_block(0, now),
            SequentialStep::Revealing { block } => {
                self.visible[block] += 1;
                if self.visible[block] >= self.lens[block] {
                    self.finish_block(block, now)
                } else {
                    Wake::At(after(now, self.char_delay(block)))
                }
            }
            SequentialStep::Gap { block } => self.enter_block(block + 1, now),
        }
    }
}

#[cfg(test)]
#[path = "sequential_tests.rs"]
mod tests;
