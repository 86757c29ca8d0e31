//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing by wrapping
//! TuiApp<TestBackend> with a hand-driven clock and convenient methods for
//! simulating user interactions.

use crate::config::ResolvedConfig;
use crate::schedule::{Clock, ManualClock};
use crate::state::PageState;
use crate::view::constants::IDLE_TIMEOUT;
use crate::view::{ColorConfig, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::buffer::{Buffer, Cell};
use ratatui::Terminal;
use std::time::Duration;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output cell by cell. The trailing cell of a wide glyph
/// is skipped so CJK text reads naturally. Empty lines are removed to keep
/// snapshots clean.
pub(crate) fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buffer[(x, y)].symbol();
            skip = unicode_width::UnicodeWidthStr::width(symbol).saturating_sub(1);
            line.push_str(symbol);
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> plus the [`ManualClock`] driving it.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    clock: ManualClock,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness with default configuration, a fixed seed and an 80x24 terminal.
    pub fn new() -> Result<Self, TuiError> {
        let config = ResolvedConfig {
            seed: Some(42),
            ..ResolvedConfig::default()
        };
        Self::with_config(config, 80, 24)
    }

    /// Harness with custom configuration and terminal size.
    pub fn with_config(config: ResolvedConfig, width: u16, height: u16) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let clock = ManualClock::new();
        let app = TuiApp::new_for_test(
            terminal,
            &config,
            Box::new(clock.clone()),
            ColorConfig::new(false),
        );

        Ok(Self {
            app,
            clock,
            running: true,
        })
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Move the pointer to a screen cell.
    pub fn move_pointer(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Moved, column, row);
    }

    /// Press and hold the left button at a screen cell.
    pub fn press(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
    }

    /// Release the left button at a screen cell.
    pub fn release(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    /// Turn the wheel one notch.
    pub fn wheel(&mut self, down: bool) {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.mouse(kind, 0, 0);
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if !self.running {
            return;
        }
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Advance the clock by `delta`, waking exactly when the event loop would.
    ///
    /// Each step jumps to the earliest task wake (frame tick or deadline), the
    /// way `event::poll` would time out without input. Returns how many steps
    /// drew.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let target = self.clock.now() + delta;
        let mut draws = 0;
        loop {
            if self.step() {
                draws += 1;
            }
            let now = self.clock.now();
            if now >= target {
                return draws;
            }
            let wait = self.app.state().next_timeout(now, IDLE_TIMEOUT);
            self.clock
                .advance(wait.max(Duration::from_micros(1)).min(target - now));
        }
    }

    /// Run one event loop pass at the current time.
    pub fn step(&mut self) -> bool {
        self.app.step_test().expect("TestBackend draw")
    }

    /// Tear the page down the way the shell does on exit.
    pub fn unmount(&mut self) {
        self.app.unmount_test();
    }

    /// Access page state for assertions
    pub fn state(&self) -> &PageState {
        self.app.state()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A single screen cell of the last drawn frame.
    pub fn cell(&self, column: u16, row: u16) -> Cell {
        self.app.terminal().backend().buffer()[(column, row)].clone()
    }

    /// Screen cell where `needle` starts in the last drawn frame.
    pub fn find_text(&self, needle: &str) -> Option<(u16, u16)> {
        let buffer = self.app.terminal().backend().buffer();
        let area = buffer.area();
        for y in area.top()..area.bottom() {
            let mut line = String::new();
            let mut starts = Vec::new();
            let mut skip = 0usize;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buffer[(x, y)].symbol();
                skip = unicode_width::UnicodeWidthStr::width(symbol).saturating_sub(1);
                starts.push((line.len(), x));
                line.push_str(symbol);
            }
            if let Some(offset) = line.find(needle) {
                return starts
                    .iter()
                    .find(|(byte, _)| *byte == offset)
                    .map(|&(_, x)| (x, y));
            }
        }
        None
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn buffer_to_string_skips_wide_glyph_tails() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        buf.set_string(0, 0, "中文ab", Style::default());
        assert_eq!(buffer_to_string(&buf), "中文ab");
    }

    #[test]
    fn harness_starts_running() {
        let harness = AcceptanceTestHarness::new().unwrap();
        assert!(harness.is_running());
    }

    #[test]
    fn harness_quits_on_q() {
        let mut harness = AcceptanceTestHarness::new().unwrap();
        assert!(harness.send_key(KeyCode::Char('q')));
        assert!(!harness.is_running());
        assert!(harness.send_key(KeyCode::Char('j')));
    }
}
