//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn default_config_path_contains_splashfx_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("splashfx") && path_str.ends_with("config.toml"),
        "Path should contain 'splashfx' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("splashfx_test_config.toml");

    let toml_content = r#"
fps = 30
show_cursor = false
lead_margin = 4

[scramble]
cycle_ms = 6000
reveal_ms = 3000

[typing]
input_delay_ms = [100, 150]

[content]
hero_title = "Hello"
paragraphs = ["one", "two", "three"]
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.fps, Some(30));
    assert_eq!(config.show_cursor, Some(false));
    assert_eq!(config.lead_margin, Some(4));
    assert_eq!(
        config.scramble,
        Some(ScrambleSection {
            cycle_ms: Some(6000),
            reveal_ms: Some(3000),
        })
    );
    assert_eq!(
        config.typing.as_ref().and_then(|t| t.input_delay_ms),
        Some([100, 150])
    );
    assert_eq!(
        config.content.as_ref().and_then(|c| c.hero_title.clone()),
        Some("Hello".to_string())
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("splashfx_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("fps = 60\nunknown_field = 1\n");
    assert!(result.is_err(), "deny_unknown_fields should reject the file");
}

#[test]
fn config_file_rejects_unknown_section_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("[scramble]\nspeed = 2\n");
    assert!(result.is_err());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_partial_sections_keep_other_defaults() {
    let config_file: ConfigFile = toml::from_str(
        r#"
[sequential]
gap_ms = 250

[typing]
pause_ms = 500
output_delay_ms = [40, 60]
"#,
    )
    .expect("valid toml");

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.sequential.gap, ms(250));
    assert_eq!(resolved.sequential.block, defaults.sequential.block);
    assert_eq!(resolved.sequential.lead, defaults.sequential.lead);
    assert_eq!(resolved.typing.pause, ms(500));
    assert_eq!(resolved.typing.output_delay, DelayRange::from_millis(40, 60));
    assert_eq!(resolved.typing.input_delay, defaults.typing.input_delay);
    assert_eq!(resolved.scramble, defaults.scramble);
}

#[test]
fn merge_config_content_overrides_only_named_strings() {
    let config_file: ConfigFile = toml::from_str(
        r#"
[content]
demo_input = "hi"
demo_output = "やあ"
"#,
    )
    .expect("valid toml");

    let resolved = merge_config(Some(config_file));
    let defaults = PageContent::default();

    assert_eq!(resolved.content.demo_input, "hi");
    assert_eq!(resolved.content.demo_output, "やあ");
    assert_eq!(resolved.content.hero_title, defaults.hero_title);
    assert_eq!(resolved.content.paragraphs, defaults.paragraphs);
}

#[test]
fn resolved_config_default_has_design_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.fps, 60);
    assert!(config.show_cursor);
    assert_eq!(config.lead_margin, 6);
    assert_eq!(config.seed, None);
    assert_eq!(config.scramble.cycle, ms(8000));
    assert_eq!(config.scramble.reveal, ms(4000));
    assert_eq!(config.sequential.block, ms(2000));
    assert_eq!(config.typing.input_delay, DelayRange::from_millis(120, 170));
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(splashfx_fps)]
fn apply_env_overrides_respects_splashfx_fps() {
    let _guard = EnvGuard::new(FPS_ENV);
    env::set_var(FPS_ENV, "30");

    let result = apply_env_overrides(ResolvedConfig::default()).expect("valid fps");

    assert_eq!(result.fps, 30);
}

#[test]
#[serial(splashfx_fps)]
fn apply_env_overrides_rejects_garbage_fps() {
    let _guard = EnvGuard::new(FPS_ENV);
    env::set_var(FPS_ENV, "fast");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial(splashfx_fps)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(FPS_ENV);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone()).expect("no override");

    assert_eq!(result, base);
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig::default();

    let result = apply_cli_overrides(base.clone(), None, Some(false), Some(7));

    assert_eq!(result.fps, base.fps);
    assert!(!result.show_cursor);
    assert_eq!(result.seed, Some(7));
}

#[test]
fn apply_cli_overrides_beats_file_value() {
    let file = ConfigFile {
        fps: Some(24),
        ..ConfigFile::default()
    };

    let result = apply_cli_overrides(merge_config(Some(file)), Some(120), None, None);

    assert_eq!(result.fps, 120);
}

#[test]
#[serial(splashfx_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("splashfx_explicit.toml");
    fs::write(&explicit_path, "fps = 12\n").expect("Failed to write explicit config");

    let env_path = temp_dir.join("splashfx_env.toml");
    fs::write(&env_path, "fps = 99\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("readable")
        .expect("present");
    assert_eq!(
        config.fps,
        Some(12),
        "Should use explicit path, not SPLASHFX_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(splashfx_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let env_path = env::temp_dir().join("splashfx_env_only.toml");
    fs::write(&env_path, "show_cursor = false\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None)
        .expect("readable")
        .expect("present");
    assert_eq!(config.show_cursor, Some(false));

    fs::remove_file(env_path).ok();
}

#[test]
fn validate_accepts_defaults() {
    assert_eq!(validate(&ResolvedConfig::default()), Ok(()));
}

#[test]
fn validate_rejects_zero_fps() {
    let config = ResolvedConfig {
        fps: 0,
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        validate(&config),
        Err(ConfigError::InvalidValue { field, .. }) if field == "fps"
    ));
}

#[test]
fn validate_rejects_reveal_longer_than_cycle() {
    let mut config = ResolvedConfig::default();
    config.scramble.reveal = ms(9000);
    assert!(matches!(
        validate(&config),
        Err(ConfigError::InvalidValue { field, .. }) if field == "scramble.reveal_ms"
    ));
}

#[test]
fn validate_rejects_zero_cycle() {
    let mut config = ResolvedConfig::default();
    config.scramble.cycle = Duration::ZERO;
    config.scramble.reveal = Duration::ZERO;
    assert!(validate(&config).is_err());
}

#[test]
fn validate_rejects_inverted_delay_range() {
    let mut config = ResolvedConfig::default();
    config.typing.input_delay = DelayRange::from_millis(200, 100);
    assert!(matches!(
        validate(&config),
        Err(ConfigError::InvalidValue { field, .. }) if field == "typing.input_delay_ms"
    ));
}

#[test]
fn validate_accepts_degenerate_delay_range() {
    let mut config = ResolvedConfig::default();
    config.typing.output_delay = DelayRange::from_millis(90, 90);
    assert_eq!(validate(&config), Ok(()));
}

#[test]
fn validate_rejects_empty_zero_range() {
    let mut config = ResolvedConfig::default();
    config.typing.output_delay = DelayRange::from_millis(0, 0);
    assert!(validate(&config).is_err());
}
