//! Frame-throttled, de-duplicated pointer broadcaster.

use super::PointerPublisher;
use crate::model::PointerPosition;
use crate::schedule::{Animator, Wake};
use rand::RngCore;
use std::time::Duration;

/// Minimum per-axis movement, in cells, that triggers a publish.
pub const PUBLISH_EPSILON: f32 = 0.1;

/// Buffers raw pointer moves and publishes at most once per frame.
///
/// Moves only touch the buffer. On each frame the buffer is compared against
/// the last published snapshot and written to the shared cell only if either
/// axis moved by more than the epsilon. A stationary pointer costs no writes.
///
/// Mounted as a [`Task`](crate::schedule::Task); moves are delivered through
/// [`Task::listener`](crate::schedule::Task::listener), which is detached on
/// unmount, and the frame request is dropped with the task's token.
#[derive(Debug)]
pub struct PointerBroadcaster {
    publisher: PointerPublisher,
    buffer: PointerPosition,
    published: PointerPosition,
    epsilon: f32,
    published_last_frame: bool,
}

impl PointerBroadcaster {
    /// Broadcaster writing to `publisher`, starting from the off-screen sentinel.
    pub fn new(publisher: PointerPublisher) -> Self {
        Self::with_epsilon(publisher, PUBLISH_EPSILON)
    }

    /// Broadcaster with a custom de-duplication threshold.
    pub fn with_epsilon(publisher: PointerPublisher, epsilon: f32) -> Self {
        Self {
            publisher,
            buffer: PointerPosition::OFFSCREEN,
            published: PointerPosition::OFFSCREEN,
            epsilon,
            published_last_frame: false,
        }
    }

    /// Record a raw pointer move. No other side effect.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.buffer = PointerPosition::new(x, y);
    }

    /// Latest buffered (not necessarily published) position.
    pub fn buffered(&self) -> PointerPosition {
        self.buffer
    }

    /// Last published snapshot.
    pub fn published(&self) -> PointerPosition {
        self.published
    }

    /// Whether the most recent frame wrote to the shared cell.
    pub fn published_last_frame(&self) -> bool {
        self.published_last_frame
    }

    /// Total writes to the shared cell.
    pub fn writes(&self) -> u64 {
        self.publisher.writes()
    }
}

impl Animator for PointerBroadcaster {
    fn resume(&mut self, _now: Duration, _rng: &mut dyn RngCore) -> Wake {
        self.published_last_frame = self.buffer.moved_from(self.published, self.epsilon);
        if self.published_last_frame {
            self.publisher.publish(self.buffer);
            self.published = self.buffer;
        }
        Wake::Frame
    }
}
