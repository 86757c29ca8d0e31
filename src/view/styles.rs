//! Page styling configuration.
//!
//! One palette for the whole page, with a monochrome fallback when colours are
//! disabled.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit setting, bypassing the environment.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// zinc-900
pub const INK: Color = Color::Rgb(24, 24, 27);
/// zinc-700, glow base
pub const GLOW_BASE: Color = Color::Rgb(63, 63, 70);
/// blue-600, glow highlight
pub const GLOW_HIGHLIGHT: Color = Color::Rgb(37, 99, 235);

// ===== PageStyles =====

/// Styles for every element kind on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyles {
    /// Whether colours are in use; the glow falls back to bold without them.
    pub colors: bool,
    /// Section titles and headings.
    pub title: Style,
    /// Body text.
    pub body: Style,
    /// Secondary text (captions, hints).
    pub muted: Style,
    /// Not-yet-revealed text.
    pub ghost: Style,
    /// Accent colour (links, badges, the cursor).
    pub accent: Style,
    /// Unlocked scramble glyphs.
    pub scramble: Style,
    /// Buttons.
    pub button: Style,
    /// Card borders.
    pub border: Style,
    /// Key caps.
    pub keycap: Style,
    /// Glow text base layer.
    pub glow_base: Style,
    /// Cursor indicator.
    pub cursor: Style,
}

impl PageStyles {
    /// Styles for the given colour setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                colors: true,
                title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                body: Style::default().fg(Color::Gray),
                muted: Style::default().fg(Color::DarkGray),
                ghost: Style::default().fg(INK),
                accent: Style::default().fg(Color::LightBlue),
                scramble: Style::default().fg(Color::Blue),
                button: Style::default()
                    .fg(Color::White)
                    .bg(GLOW_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
                border: Style::default().fg(Color::DarkGray),
                keycap: Style::default().fg(Color::White).add_modifier(Modifier::REVERSED),
                glow_base: Style::default().fg(GLOW_BASE).add_modifier(Modifier::BOLD),
                cursor: Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                colors: false,
                title: Style::default().add_modifier(Modifier::BOLD),
                body: Style::default(),
                muted: Style::default(),
                ghost: Style::default().add_modifier(Modifier::DIM),
                accent: Style::default().add_modifier(Modifier::UNDERLINED),
                scramble: Style::default().add_modifier(Modifier::DIM),
                button: Style::default().add_modifier(Modifier::REVERSED),
                border: Style::default(),
                keycap: Style::default().add_modifier(Modifier::REVERSED),
                glow_base: Style::default(),
                cursor: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }
}

impl Default for PageStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
