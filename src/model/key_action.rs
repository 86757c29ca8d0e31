//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`KeyBindings`](crate::config::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll the page up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the page down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the page. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the page. Default: G/End
    ScrollToBottom,
    /// Leave the application. Default: q/Esc
    Quit,
}
