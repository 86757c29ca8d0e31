//! Pointer data shared by the broadcaster, cursor and glow layers.

/// Pointer position in terminal cells (column, row), screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    /// Column.
    pub x: f32,
    /// Row.
    pub y: f32,
}

impl PointerPosition {
    /// Far off-screen position used before the first pointer movement, so that
    /// nothing is highlighted yet.
    pub const OFFSCREEN: Self = Self {
        x: -10_000.0,
        y: -10_000.0,
    };

    /// Position from coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether either axis moved by more than `epsilon` relative to `other`.
    pub fn moved_from(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() > epsilon || (self.y - other.y).abs() > epsilon
    }

    /// Terminal cell under the pointer, if the position is non-negative.
    pub fn cell(self) -> Option<(u16, u16)> {
        if self.x < 0.0 || self.y < 0.0 {
            return None;
        }
        // saturating float-to-int casts
        Some((self.x as u16, self.y as u16))
    }
}

impl Default for PointerPosition {
    fn default() -> Self {
        Self::OFFSCREEN
    }
}

/// Interaction state tracked by the cursor indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    /// Primary button is held down.
    pub pressed: bool,
    /// Pointer is over an interactive element.
    pub hovering: bool,
}
