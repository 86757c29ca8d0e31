//! splashfx - Entry Point

use clap::Parser;
use splashfx::model::AppError;
use splashfx::view::ColorConfig;
use std::path::PathBuf;
use tracing::info;

/// splashfx - the CNJP Input landing page, animated in the terminal
#[derive(Parser, Debug)]
#[command(name = "splashfx")]
#[command(version)]
#[command(about = "Terminal rendition of the CNJP Input landing page and its interactive effects")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display frame rate (frames per second)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Seed for the random decoy glyphs and typing delays
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not draw the cursor-following indicator
    #[arg(long)]
    pub no_cursor: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = splashfx::config::load_config_with_precedence(args.config.clone())?;
        let merged = splashfx::config::merge_config(config_file);
        let with_env = splashfx::config::apply_env_overrides(merged)?;

        // Only override show_cursor if the flag was explicitly set
        let cursor_override = if args.no_cursor { Some(false) } else { None };
        splashfx::config::apply_cli_overrides(with_env, args.fps, cursor_override, args.seed)
    };
    splashfx::config::validate(&config)?;

    splashfx::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let colors = ColorConfig::from_env_and_args(args.no_color);
    splashfx::view::run_with_config(&config, colors)?;

    Ok(())
}
