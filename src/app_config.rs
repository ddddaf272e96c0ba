use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::subtitle_processor::TimestampPolicy;

/// Application configuration module
/// This module handles loading and validating the settings of an alignment
/// run. Paths to the subtitle and line sources are never stored here; they
/// come from the command line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// How malformed timestamp lines are handled
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,

    /// Margin subtracted from clip starts and added to clip ends
    #[serde(default = "default_slop_ms")]
    pub slop_ms: u64,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Result shape
    #[serde(default)]
    pub format: OutputFormat,

    // @field: File name prefix for extracted clips
    #[serde(default = "default_clip_prefix")]
    pub clip_prefix: String,

    // @field: File extension for extracted clips
    #[serde(default = "default_clip_extension")]
    pub clip_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            clip_prefix: default_clip_prefix(),
            clip_extension: default_clip_extension(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Values given on the command line; each one that is set replaces the
/// matching config value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub timestamp_policy: Option<TimestampPolicy>,
    pub slop_ms: Option<u64>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<LogLevel>,
}

fn default_slop_ms() -> u64 {
    500
}

fn default_clip_prefix() -> String {
    "clip_".to_string()
}

fn default_clip_extension() -> String {
    "mp3".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Apply command line values on top of the loaded file
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(policy) = overrides.timestamp_policy {
            self.timestamp_policy = policy;
        }
        if let Some(slop_ms) = overrides.slop_ms {
            self.slop_ms = slop_ms;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let ext = &self.output.clip_extension;
        if ext.is_empty() {
            return Err(anyhow!("Clip extension must not be empty"));
        }
        if ext.contains(['/', '\\', '.']) {
            return Err(anyhow!("Clip extension must be a bare extension, got '{}'", ext));
        }
        if self.output.clip_prefix.is_empty() {
            return Err(anyhow!("Clip prefix must not be empty"));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            timestamp_policy: TimestampPolicy::default(),
            slop_ms: default_slop_ms(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
