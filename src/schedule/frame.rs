//! Fixed-rate frame ticker standing in for the display's vsync callback.

use std::time::Duration;

/// Emits frame ticks on a fixed grid `start + k * interval`.
///
/// Missed frames are skipped, not replayed: after a stall the next tick lands on
/// the first grid point after `now`.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    next: Duration,
}

impl FrameTicker {
    /// Ticker at `fps` frames per second starting at `now`. `fps` of 0 is treated as 1.
    pub fn new(fps: u32, now: Duration) -> Self {
        let interval = Duration::from_secs(1) / fps.max(1);
        Self {
            interval,
            next: now,
        }
    }

    /// Frame interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the next frame tick.
    pub fn next_frame(&self) -> Duration {
        self.next
    }

    /// Consume a frame tick if one is due at `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        if now < self.next {
            return false;
        }
        let behind = (now - self.next).as_nanos() / self.interval.as_nanos().max(1);
        let skip = u32::try_from(behind + 1).unwrap_or(u32::MAX);
        self.next += self.interval * skip;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_due_immediately() {
        let mut frames = FrameTicker::new(60, Duration::ZERO);
        assert!(frames.tick(Duration::ZERO));
        assert!(!frames.tick(Duration::from_millis(1)));
    }

    #[test]
    fn interval_matches_rate() {
        assert_eq!(
            FrameTicker::new(50, Duration::ZERO).interval(),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn zero_fps_falls_back_to_one() {
        assert_eq!(
            FrameTicker::new(0, Duration::ZERO).interval(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn stall_skips_missed_frames() {
        let mut frames = FrameTicker::new(50, Duration::ZERO);
        assert!(frames.tick(Duration::ZERO));
        // 105ms late: frames at 20, 40, 60, 80, 100 are collapsed into one tick
        assert!(frames.tick(Duration::from_millis(105)));
        assert_eq!(frames.next_frame(), Duration::from_millis(120));
    }
}
