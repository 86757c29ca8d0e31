//! Configuration file loading with precedence handling.

use crate::anim::{DelayRange, ScrambleTimings, SequentialTimings, TypingTimings};
use crate::model::PageContent;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SPLASHFX_CONFIG";

/// Environment variable overriding the frame rate.
pub const FPS_ENV: &str = "SPLASHFX_FPS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field name, e.g. `scramble.reveal_ms`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/splashfx/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Frame rate of the host loop.
    #[serde(default)]
    pub fps: Option<u32>,

    /// Draw the cursor-following indicator.
    #[serde(default)]
    pub show_cursor: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Rows around the viewport within which glow layers stay constructed.
    #[serde(default)]
    pub lead_margin: Option<u16>,

    /// Radius of the glow highlight, in columns.
    #[serde(default)]
    pub glow_radius: Option<f32>,

    /// Scramble title timing.
    #[serde(default)]
    pub scramble: Option<ScrambleSection>,

    /// Sequential reveal timing.
    #[serde(default)]
    pub sequential: Option<SequentialSection>,

    /// Typing simulation timing.
    #[serde(default)]
    pub typing: Option<TypingSection>,

    /// Text overrides for animated content.
    #[serde(default)]
    pub content: Option<ContentSection>,
}

/// `[scramble]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScrambleSection {
    /// Full cycle length in milliseconds.
    pub cycle_ms: Option<u64>,
    /// Lock-in window in milliseconds.
    pub reveal_ms: Option<u64>,
}

/// `[sequential]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SequentialSection {
    /// Pause before the first block.
    pub lead_ms: Option<u64>,
    /// Reveal time per block.
    pub block_ms: Option<u64>,
    /// Pause between blocks.
    pub gap_ms: Option<u64>,
    /// Hold after the last block.
    pub dwell_ms: Option<u64>,
}

/// `[typing]` section.
///
/// ```toml
/// [typing]
/// input_delay_ms = [120, 170]
/// output_delay_ms = [80, 110]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TypingSection {
    /// Pause before input typing.
    pub lead_ms: Option<u64>,
    /// Per-character input delay range `[lo, hi)`.
    pub input_delay_ms: Option<[u64; 2]>,
    /// Pause between input and output.
    pub pause_ms: Option<u64>,
    /// Per-character output delay range `[lo, hi)`.
    pub output_delay_ms: Option<[u64; 2]>,
    /// Hold on the finished state.
    pub dwell_ms: Option<u64>,
}

/// `[content]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    /// Scramble target.
    pub hero_title: Option<String>,
    /// Glow tagline under the hero title.
    pub hero_tagline: Option<String>,
    /// Sequentially revealed paragraphs.
    pub paragraphs: Option<Vec<String>>,
    /// Typing simulation input.
    pub demo_input: Option<String>,
    /// Typing simulation output.
    pub demo_output: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Frame rate.
    pub fps: u32,
    /// Cursor indicator visible.
    pub show_cursor: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Glow visibility margin in rows.
    pub lead_margin: u16,
    /// Glow radius in columns.
    pub glow_radius: f32,
    /// RNG seed for the animators; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Scramble timing.
    pub scramble: ScrambleTimings,
    /// Sequential reveal timing.
    pub sequential: SequentialTimings,
    /// Typing simulation timing.
    pub typing: TypingTimings,
    /// Page text.
    pub content: PageContent,
}

/// Default frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Default glow visibility margin in rows.
pub const DEFAULT_LEAD_MARGIN: u16 = 6;

/// Default glow radius in columns.
pub const DEFAULT_GLOW_RADIUS: f32 = 12.0;

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            show_cursor: true,
            log_file_path: default_log_path(),
            lead_margin: DEFAULT_LEAD_MARGIN,
            glow_radius: DEFAULT_GLOW_RADIUS,
            seed: None,
            scramble: ScrambleTimings::default(),
            sequential: SequentialTimings::default(),
            typing: TypingTimings::default(),
            content: PageContent::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/splashfx/splashfx.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("splashfx").join("splashfx.log")
    } else {
        PathBuf::from("splashfx.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/splashfx/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("splashfx").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SPLASHFX_CONFIG` environment variable
/// 3. Default path `~/.config/splashfx/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SPLASHFX_FPS`: Override frame rate
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if the variable is set but not a number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(FPS_ENV) {
        config.fps = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: FPS_ENV.to_string(),
            reason: format!("expected a positive integer, got {raw:?}"),
        })?;
    }

    Ok(config)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn merge_range(range: Option<[u64; 2]>, default: DelayRange) -> DelayRange {
    range.map_or(default, |[lo, hi]| DelayRange::from_millis(lo, hi))
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let scramble = config.scramble.unwrap_or_default();
    let sequential = config.sequential.unwrap_or_default();
    let typing = config.typing.unwrap_or_default();
    let content = config.content.unwrap_or_default();

    let mut page = defaults.content;
    if let Some(title) = content.hero_title {
        page.hero_title = title;
    }
    if let Some(tagline) = content.hero_tagline {
        page.hero_tagline = tagline;
    }
    if let Some(paragraphs) = content.paragraphs {
        page.paragraphs = paragraphs;
    }
    if let Some(input) = content.demo_input {
        page.demo_input = input;
    }
    if let Some(output) = content.demo_output {
        page.demo_output = output;
    }

    ResolvedConfig {
        fps: config.fps.unwrap_or(defaults.fps),
        show_cursor: config.show_cursor.unwrap_or(defaults.show_cursor),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        lead_margin: config.lead_margin.unwrap_or(defaults.lead_margin),
        glow_radius: config.glow_radius.unwrap_or(defaults.glow_radius),
        seed: defaults.seed,
        scramble: ScrambleTimings {
            cycle: scramble.cycle_ms.map_or(defaults.scramble.cycle, ms),
            reveal: scramble.reveal_ms.map_or(defaults.scramble.reveal, ms),
        },
        sequential: SequentialTimings {
            lead: sequential.lead_ms.map_or(defaults.sequential.lead, ms),
            block: sequential.block_ms.map_or(defaults.sequential.block, ms),
            gap: sequential.gap_ms.map_or(defaults.sequential.gap, ms),
            dwell: sequential.dwell_ms.map_or(defaults.sequential.dwell, ms),
        },
        typing: TypingTimings {
            lead: typing.lead_ms.map_or(defaults.typing.lead, ms),
            input_delay: merge_range(typing.input_delay_ms, defaults.typing.input_delay),
            pause: typing.pause_ms.map_or(defaults.typing.pause, ms),
            output_delay: merge_range(typing.output_delay_ms, defaults.typing.output_delay),
            dwell: typing.dwell_ms.map_or(defaults.typing.dwell, ms),
        },
        content: page,
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    fps_override: Option<u32>,
    show_cursor_override: Option<bool>,
    seed_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(fps) = fps_override {
        config.fps = fps;
    }

    if let Some(show_cursor) = show_cursor_override {
        config.show_cursor = show_cursor;
    }

    if seed_override.is_some() {
        config.seed = seed_override;
    }

    config
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn check_range(field: &str, range: DelayRange) -> Result<(), ConfigError> {
    if range.max < range.min {
        return Err(invalid(field, "upper bound is below lower bound"));
    }
    if range.max.is_zero() {
        return Err(invalid(field, "range must not be empty"));
    }
    Ok(())
}

/// Check the fully resolved configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] naming the first offending field.
pub fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    if config.fps == 0 {
        return Err(invalid("fps", "must be at least 1"));
    }
    if config.scramble.cycle.is_zero() {
        return Err(invalid("scramble.cycle_ms", "must be greater than zero"));
    }
    if config.scramble.reveal > config.scramble.cycle {
        return Err(invalid(
            "scramble.reveal_ms",
            "reveal window cannot exceed the cycle length",
        ));
    }
    if !config.glow_radius.is_finite() || config.glow_radius <= 0.0 {
        return Err(invalid("glow_radius", "must be a positive number"));
    }
    check_range("typing.input_delay_ms", config.typing.input_delay)?;
    check_range("typing.output_delay_ms", config.typing.output_delay)?;
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
