/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use srtalign::app_config::{Config, ConfigOverrides, LogLevel};
use srtalign::output::OutputFormat;
use srtalign::subtitle_processor::TimestampPolicy;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.timestamp_policy, TimestampPolicy::Strict);
    assert_eq!(config.slop_ms, 500);
    assert_eq!(config.output.format, OutputFormat::Ranges);
    assert_eq!(config.output.clip_prefix, "clip_");
    assert_eq!(config.output.clip_extension, "mp3");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withBadClipSettings_shouldFail() {
    let mut config = Config::default();

    config.output.clip_extension = String::new();
    assert!(config.validate().is_err());

    config.output.clip_extension = "../mp3".to_string();
    assert!(config.validate().is_err());

    config.output.clip_extension = "wav".to_string();
    config.output.clip_prefix = String::new();
    assert!(config.validate().is_err());
}

/// Test that a partial file fills the rest with defaults
#[test]
fn test_from_file_withPartialJson_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "srtalign.json",
        r#"{ "timestamp_policy": "lenient", "output": { "format": "json" } }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.timestamp_policy, TimestampPolicy::Lenient);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.clip_extension, "mp3");
    assert_eq!(config.slop_ms, 500);
    Ok(())
}

/// Test serialization round trip
#[test]
fn test_config_serialization_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.slop_ms = 250;
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"strict\""));
    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed, config);
    Ok(())
}

/// Test missing and invalid config files
#[test]
fn test_load_or_default_withMissingOrBrokenFile_shouldBehave() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let missing = temp_dir.path().join("nope.json");
    assert_eq!(Config::load_or_default(&missing)?, Config::default());

    let broken = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;
    assert!(Config::load_or_default(&broken).is_err());
    Ok(())
}

/// Test that command line values replace file values and unset ones leave them alone
#[test]
fn test_apply_overrides_withPartialFlags_shouldReplaceOnlyGivenValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "srtalign.json",
        r#"{ "timestamp_policy": "lenient", "slop_ms": 250, "output": { "format": "json" }, "log_level": "warn" }"#,
    )?;
    let mut config = Config::load_or_default(&path)?;

    config.apply_overrides(&ConfigOverrides {
        format: Some(OutputFormat::Ffmpeg),
        log_level: Some(LogLevel::Debug),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.output.format, OutputFormat::Ffmpeg);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.timestamp_policy, TimestampPolicy::Lenient);
    assert_eq!(config.slop_ms, 250);
    Ok(())
}

/// Test that every override field is applied
#[test]
fn test_apply_overrides_withAllFlags_shouldReplaceEverything() {
    let mut config = Config::default();
    config.apply_overrides(&ConfigOverrides {
        timestamp_policy: Some(TimestampPolicy::Lenient),
        slop_ms: Some(0),
        format: Some(OutputFormat::Json),
        log_level: Some(LogLevel::Error),
    });

    assert_eq!(config.timestamp_policy, TimestampPolicy::Lenient);
    assert_eq!(config.slop_ms, 0);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.log_level, LogLevel::Error);

    let before = config.clone();
    config.apply_overrides(&ConfigOverrides::default());
    assert_eq!(config, before);
}
