//! Cooperative scheduling primitives (pure core).
//!
//! Everything animated on the page is an [`Animator`]: an explicit state machine
//! that is resumed by the host loop and answers with the next [`Wake`] it needs.
//! A [`Task`] pairs an animator with its [`CancelToken`], so mounting and
//! teardown always happen on the same lifecycle boundary.
//!
//! Nothing here spawns threads or blocks. The host decides *when* to call
//! [`Task::poll`]; the task decides *whether* it is due.

pub mod cancel;
pub mod clock;
pub mod frame;
pub mod sim;
pub mod task;

pub use cancel::CancelToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use frame::FrameTicker;
pub use sim::Simulation;
pub use task::Task;

use rand::RngCore;
use std::time::Duration;

/// What an animator asks the scheduler for after a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Resume on the next display frame.
    Frame,
    /// Resume once the clock reaches this instant (clock timeline).
    At(Duration),
    /// Never resume again.
    Never,
}

impl Wake {
    /// Whether a task holding this wake should run now.
    ///
    /// `frame` is true when the host is on a frame tick.
    pub fn is_due(self, now: Duration, frame: bool) -> bool {
        match self {
            Wake::Frame => frame,
            Wake::At(deadline) => now >= deadline,
            Wake::Never => false,
        }
    }

    /// The deadline, if this is a timed wake.
    pub fn deadline(self) -> Option<Duration> {
        match self {
            Wake::At(deadline) => Some(deadline),
            _ => None,
        }
    }
}

/// A self-driving state machine resumed by the host scheduler.
///
/// `resume` is called once right after mount and then again every time the
/// previously returned [`Wake`] becomes due. Implementations perform exactly the
/// state mutations belonging to that resumption and return the next wait.
pub trait Animator {
    /// Advance the state machine at clock time `now`.
    fn resume(&mut self, now: Duration, rng: &mut dyn RngCore) -> Wake;
}

/// Compute how long the host may sleep before something needs attention.
///
/// Combines every task's pending wake with the frame ticker: frame requests
/// only matter when at least one task asked for one. With nothing pending the
/// host falls back to `idle`.
pub fn next_timeout<I>(wakes: I, now: Duration, frames: &FrameTicker, idle: Duration) -> Duration
where
    I: IntoIterator<Item = Wake>,
{
    let mut earliest: Option<Duration> = None;
    for wake in wakes {
        let at = match wake {
            Wake::Frame => frames.next_frame(),
            Wake::At(deadline) => deadline,
            Wake::Never => continue,
        };
        earliest = Some(earliest.map_or(at, |e| e.min(at)));
    }

    match earliest {
        Some(at) => at.saturating_sub(now),
        None => idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_wake_is_only_due_on_frame_ticks() {
        assert!(Wake::Frame.is_due(Duration::ZERO, true));
        assert!(!Wake::Frame.is_due(Duration::from_secs(10), false));
    }

    #[test]
    fn timed_wake_is_due_at_and_after_deadline() {
        let wake = Wake::At(Duration::from_millis(600));
        assert!(!wake.is_due(Duration::from_millis(599), true));
        assert!(wake.is_due(Duration::from_millis(600), false));
        assert!(wake.is_due(Duration::from_millis(601), false));
    }

    #[test]
    fn never_wake_is_never_due() {
        assert!(!Wake::Never.is_due(Duration::MAX, true));
        assert_eq!(Wake::Never.deadline(), None);
    }

    #[test]
    fn next_timeout_picks_earliest_deadline() {
        let frames = FrameTicker::new(60, Duration::ZERO);
        let timeout = next_timeout(
            [
                Wake::At(Duration::from_millis(900)),
                Wake::At(Duration::from_millis(400)),
                Wake::Never,
            ],
            Duration::from_millis(100),
            &frames,
            Duration::from_secs(1),
        );
        assert_eq!(timeout, Duration::from_millis(300));
    }

    #[test]
    fn next_timeout_uses_frame_only_when_requested() {
        let mut frames = FrameTicker::new(50, Duration::ZERO);
        assert!(frames.tick(Duration::ZERO));
        let with_frame = next_timeout(
            [Wake::Frame, Wake::At(Duration::from_secs(5))],
            Duration::ZERO,
            &frames,
            Duration::from_secs(1),
        );
        assert_eq!(with_frame, Duration::from_millis(20));

        let idle = next_timeout([Wake::Never], Duration::ZERO, &frames, Duration::from_secs(1));
        assert_eq!(idle, Duration::from_secs(1));
    }

    #[test]
    fn next_timeout_is_zero_for_overdue_deadline() {
        let frames = FrameTicker::new(60, Duration::ZERO);
        let timeout = next_timeout(
            [Wake::At(Duration::from_millis(10))],
            Duration::from_millis(50),
            &frames,
            Duration::from_secs(1),
        );
        assert_eq!(timeout, Duration::ZERO);
    }
}
