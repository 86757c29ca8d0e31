//! Layout and timing constants for the page shell.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Maximum width of the page column; wider terminals center it.
pub const PAGE_MAX_WIDTH: u16 = 96;

/// Horizontal padding inside the page column.
pub const PAGE_PADDING: u16 = 2;

/// Blank rows between page sections.
pub const SECTION_GAP: u16 = 2;

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_STEP: u16 = 3;

/// Poll timeout when no task is waiting on anything.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Caret shown after text that is being typed.
pub const CARET: &str = "▍";

/// Prefix of the demo card's output line.
pub const OUTPUT_PREFIX: &str = "› ";

/// Prefix of the demo card's input line.
pub const INPUT_PREFIX: &str = "> ";

/// Cursor indicator glyph while the button is held.
pub const CURSOR_PRESSED: &str = "·";

/// Cursor indicator glyph at rest.
pub const CURSOR_BASELINE: &str = "●";

/// Cursor indicator glyph over interactive elements.
pub const CURSOR_HOVER: &str = "◉";
