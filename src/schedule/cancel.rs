//! Cancellation flag shared between a task and whoever owns its lifecycle.

use std::cell::Cell;
use std::rc::Rc;

/// Single boolean "cancelled" flag captured at mount.
///
/// Clones observe the same flag. Once cancelled it stays cancelled; a task is
/// remounted with a fresh token, never by resetting an old one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Create a token in the live (not cancelled) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
