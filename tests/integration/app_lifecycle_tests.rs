/*!
 * Tests for the application controller lifecycle
 */

use anyhow::Result;

use srtalign::app_config::Config;
use srtalign::app_controller::Controller;
use srtalign::output::OutputFormat;
use srtalign::subtitle_processor::TimestampPolicy;
use crate::common;

/// Test that invalid configuration is rejected up front
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.output.clip_extension = String::new();
    assert!(Controller::with_config(config).is_err());
}

/// Test that a malformed track aborts the whole run under the strict policy
#[test]
fn test_run_withMalformedTrackStrict_shouldAbort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nHallo\n\n2\nbad --> --> worse\nWelt\n",
    )?;
    let lines = common::create_test_file(temp_dir.path(), "lines.txt", "Hallo\n")?;
    let out = temp_dir.path().join("out.txt");

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run(&srt, &lines, None, Some(out.as_path()));

    assert!(result.is_err());
    assert!(!out.exists(), "nothing should be written for a malformed track");
    Ok(())
}

/// Test that the lenient policy keeps going over the same track
#[test]
fn test_run_withMalformedTrackLenient_shouldAlign() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nHallo\n\n2\nbad --> --> worse\nWelt\n",
    )?;
    let lines = common::create_test_file(temp_dir.path(), "lines.txt", "Hallo\n")?;

    let mut config = Config::default();
    config.timestamp_policy = TimestampPolicy::Lenient;
    let controller = Controller::with_config(config)?;
    let report = controller.align_files(&srt, &lines)?;

    assert_eq!(report.aligned.len(), 1);
    assert_eq!(report.aligned[0].interval.start_ms(), 1000);
    Ok(())
}

/// Test that missing inputs surface as errors
#[test]
fn test_align_files_withMissingInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "film.srt")?;
    let controller = Controller::with_config(Config::default())?;

    assert!(controller.align_files(temp_dir.path().join("missing.srt"), &srt).is_err());
    assert!(controller.align_files(&srt, temp_dir.path().join("missing.txt")).is_err());
    Ok(())
}

/// Test that the ffmpeg format refuses to run without media
#[test]
fn test_run_withFfmpegFormatWithoutMedia_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "film.srt")?;
    let lines = common::create_test_lines(temp_dir.path(), "lines.txt")?;

    let mut config = Config::default();
    config.output.format = OutputFormat::Ffmpeg;
    let controller = Controller::with_config(config)?;

    assert!(controller.run(&srt, &lines, None, None).is_err());
    Ok(())
}

/// Test that an empty track skips every line instead of failing
#[test]
fn test_align_files_withEmptyTrack_shouldSkipAllLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "empty.srt", "")?;
    let lines = common::create_test_lines(temp_dir.path(), "lines.txt")?;

    let controller = Controller::with_config(Config::default())?;
    let report = controller.align_files(&srt, &lines)?;

    assert!(report.aligned.is_empty());
    assert_eq!(report.skipped.len(), 4);
    Ok(())
}
