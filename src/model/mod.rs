//! Domain model types (pure).
//!
//! All types in this module are plain data shared between the animators, the
//! page state and the renderer.

pub mod content;
pub mod error;
pub mod key_action;
pub mod pointer;

// Re-export for convenience
pub use content::{FeatureCard, PageContent, Shortcut, StatusBadge, TechSpec, WorkLink};
pub use error::AppError;
pub use key_action::KeyAction;
pub use pointer::{InteractionFlags, PointerPosition};
