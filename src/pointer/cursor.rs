//! Cursor-following indicator state.

use super::{ElementKind, PointerReader};
use crate::model::{InteractionFlags, PointerPosition};

/// Rendered size of the cursor indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorScale {
    /// Button held down; smallest.
    Pressed,
    /// Neither pressed nor hovering.
    Baseline,
    /// Over an interactive element; largest.
    Hover,
}

impl CursorScale {
    /// Scale for the given flags. Press wins over hover.
    pub fn from_flags(flags: InteractionFlags) -> Self {
        if flags.pressed {
            CursorScale::Pressed
        } else if flags.hovering {
            CursorScale::Hover
        } else {
            CursorScale::Baseline
        }
    }

    /// Numeric scale factor relative to the baseline size.
    pub fn factor(self) -> f32 {
        match self {
            CursorScale::Pressed => 0.8,
            CursorScale::Baseline => 1.0,
            CursorScale::Hover => 1.5,
        }
    }
}

/// Interaction flags plus a reader on the shared pointer position.
#[derive(Debug, Clone)]
pub struct CursorState {
    pointer: PointerReader,
    flags: InteractionFlags,
}

impl CursorState {
    /// Cursor reading positions from `pointer`.
    pub fn new(pointer: PointerReader) -> Self {
        Self {
            pointer,
            flags: InteractionFlags::default(),
        }
    }

    /// Primary button went down (`true`) or up (`false`). No debounce.
    pub fn on_button(&mut self, down: bool) {
        self.flags.pressed = down;
    }

    /// Pointer entered the element chain `ancestry` (innermost first).
    pub fn on_pointer_over(&mut self, ancestry: &[ElementKind]) {
        self.flags.hovering = ancestry.iter().any(|kind| kind.is_interactive());
    }

    /// Current flags.
    pub fn flags(&self) -> InteractionFlags {
        self.flags
    }

    /// Current scale.
    pub fn scale(&self) -> CursorScale {
        CursorScale::from_flags(self.flags)
    }

    /// Latest published pointer position.
    pub fn position(&self) -> PointerPosition {
        self.pointer.get()
    }
}
