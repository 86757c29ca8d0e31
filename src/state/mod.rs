//! Page state (pure).
//!
//! Owns every mounted animation task and the interaction state the shell
//! feeds from terminal events. Nothing here touches the terminal.

pub mod page_state;

pub use page_state::{GlowSlot, PageState};
