//! Pointer subsystem: the shared position cell, its broadcaster, the cursor
//! indicator state, and hit-testing of interactive page elements.
//!
//! [`PointerBroadcaster`] is the only writer of the shared position. Cursor and
//! glow rendering hold [`PointerReader`]s and only ever read.

pub mod broadcaster;
pub mod cell;
pub mod cursor;

pub use broadcaster::{PointerBroadcaster, PUBLISH_EPSILON};
pub use cell::{pointer_channel, PointerPublisher, PointerReader};
pub use cursor::{CursorScale, CursorState};
pub use hit_test::{ElementKind, HitMap};
