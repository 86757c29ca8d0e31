//! Process-wide published pointer position.
//!
//! One [`PointerPublisher`] (not `Clone`) and any number of [`PointerReader`]s
//! share a single atomic cell. Both coordinates are packed into one `u64`, so a
//! reader can never observe `x` from one publish and `y` from another.

use crate::model::PointerPosition;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn pack(pos: PointerPosition) -> u64 {
    (u64::from(pos.x.to_bits()) << 32) | u64::from(pos.y.to_bits())
}

fn unpack(bits: u64) -> PointerPosition {
    PointerPosition {
        x: f32::from_bits((bits >> 32) as u32),
        y: f32::from_bits(bits as u32),
    }
}

/// Create the shared cell initialised to `initial`.
pub fn pointer_channel(initial: PointerPosition) -> (PointerPublisher, PointerReader) {
    let cell = Arc::new(AtomicU64::new(pack(initial)));
    (
        PointerPublisher {
            cell: Arc::clone(&cell),
            writes: 0,
        },
        PointerReader { cell },
    )
}

/// Sole writer of the shared position.
#[derive(Debug)]
pub struct PointerPublisher {
    cell: Arc<AtomicU64>,
    writes: u64,
}

impl PointerPublisher {
    /// Replace the published position.
    pub fn publish(&mut self, pos: PointerPosition) {
        self.cell.store(pack(pos), Ordering::Release);
        self.writes += 1;
    }

    /// Number of publishes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// A reader of this cell.
    pub fn subscribe(&self) -> PointerReader {
        PointerReader {
            cell: Arc::clone(&self.cell),
        }
    }
}

/// Read handle on the shared position.
#[derive(Debug, Clone)]
pub struct PointerReader {
    cell: Arc<AtomicU64>,
}

impl PointerReader {
    /// Latest published position.
    pub fn get(&self) -> PointerPosition {
        unpack(self.cell.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_sees_initial_value() {
        let (_publisher, reader) = pointer_channel(PointerPosition::OFFSCREEN);
        assert_eq!(reader.get(), PointerPosition::OFFSCREEN);
    }

    #[test]
    fn all_readers_see_latest_publish() {
        let (mut publisher, reader) = pointer_channel(PointerPosition::OFFSCREEN);
        let second = publisher.subscribe();
        let third = reader.clone();

        publisher.publish(PointerPosition::new(12.5, -3.25));

        for r in [&reader, &second, &third] {
            assert_eq!(r.get(), PointerPosition::new(12.5, -3.25));
        }
        assert_eq!(publisher.writes(), 1);
    }

    #[test]
    fn pack_preserves_negative_and_fractional_values() {
        let pos = PointerPosition::new(-0.5, 1234.875);
        assert_eq!(unpack(pack(pos)), pos);
    }
}
