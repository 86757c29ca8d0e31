//! Deterministic virtual-time driver.
//!
//! Steps a task exactly to the instants it asks for: timed wakes fire at their
//! deadline, frame wakes fire on the frame grid `k * frame_interval`. Used to
//! sample animator trajectories without a terminal or a real clock.

use super::{Animator, Task, Wake};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Virtual clock plus seeded random source.
#[derive(Debug)]
pub struct Simulation {
    now: Duration,
    frame_interval: Duration,
    rng: StdRng,
}

impl Simulation {
    /// New simulation at time zero with a 60 fps frame grid.
    pub fn new(seed: u64) -> Self {
        Self::with_frame_interval(seed, Duration::from_secs(1) / 60)
    }

    /// New simulation at time zero with a custom frame grid.
    pub fn with_frame_interval(seed: u64, frame_interval: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            frame_interval: frame_interval.max(Duration::from_nanos(1)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Mount an animator at the current virtual time.
    pub fn mount<A: Animator>(&self, label: &'static str, animator: A) -> Task<A> {
        Task::mount(label, animator, self.now)
    }

    /// Run `task` until virtual time `until` (inclusive), calling `observe` after
    /// every resume. Afterwards the simulation clock sits at `until`.
    ///
    /// Returns the number of resumes performed.
    pub fn run_until<A, F>(&mut self, task: &mut Task<A>, until: Duration, mut observe: F) -> usize
    where
        A: Animator,
        F: FnMut(Duration, &A),
    {
        let mut resumes = 0;
        loop {
            let next = match task.pending() {
                Wake::Never => break,
                Wake::At(deadline) => deadline.max(self.now),
                Wake::Frame => self.next_frame_after(self.now),
            };
            if next > until {
                break;
            }
            self.now = next;
            let frame = self.is_frame_boundary(next);
            if task.poll(next, frame, &mut self.rng) {
                resumes += 1;
                observe(self.now, task.animator());
            }
        }
        self.now = self.now.max(until);
        resumes
    }

    /// Convenience wrapper around [`run_until`](Self::run_until) without an observer.
    pub fn advance_to<A: Animator>(&mut self, task: &mut Task<A>, until: Duration) -> usize {
        self.run_until(task, until, |_, _| {})
    }

    fn next_frame_after(&self, t: Duration) -> Duration {
        let step = self.frame_interval.as_nanos();
        let k = t.as_nanos() / step + 1;
        Duration::from_nanos(u64::try_from(k * step).unwrap_or(u64::MAX))
    }

    fn is_frame_boundary(&self, t: Duration) -> bool {
        t.as_nanos() % self.frame_interval.as_nanos() == 0
    }
}
