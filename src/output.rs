/*!
 * Rendering of alignment results.
 *
 * Three shapes are supported:
 * - `ranges`: one `START --> END line` row per aligned line
 * - `json`: an array of match records
 * - `ffmpeg`: one clip extraction command per interval, widened by the slop
 */

use std::fmt;
use std::path::PathBuf;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::alignment::AlignedLine;
use crate::errors::AppError;
use crate::timecode::{self, TimeInterval};

/// Output shape for aligned lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ranges,
    Json,
    Ffmpeg,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranges => write!(f, "ranges"),
            Self::Json => write!(f, "json"),
            Self::Ffmpeg => write!(f, "ffmpeg"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "ranges" => Ok(Self::Ranges),
            "json" => Ok(Self::Json),
            "ffmpeg" => Ok(Self::Ffmpeg),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Settings for ffmpeg clip commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSettings {
    /// Media file the clips are cut from
    pub media_path: Option<PathBuf>,
    pub slop_ms: u64,
    pub clip_prefix: String,
    pub clip_extension: String,
}

impl ClipSettings {
    /// Build the command extracting `interval` into clip number `number`
    pub fn ffmpeg_command(&self, number: usize, interval: TimeInterval, comment: &str) -> Result<String, AppError> {
        let media = self.media_path.as_ref().ok_or_else(|| {
            AppError::Config("ffmpeg output requires a media file".to_string())
        })?;
        let padded = interval.with_slop(self.slop_ms);
        let clip_name = format!("{}{:04}.{}", self.clip_prefix, number, self.clip_extension);

        let mut command = format!(
            "ffmpeg -ss {} -to {} -i {} -c copy {}",
            timecode::format_ffmpeg_timestamp(padded.start_ms()),
            timecode::format_ffmpeg_timestamp(padded.end_ms()),
            shell_words::quote(&media.to_string_lossy()),
            shell_words::quote(&clip_name),
        );
        let comment = comment.trim();
        if !comment.is_empty() {
            command.push_str(" # ");
            command.push_str(comment);
        }
        Ok(command)
    }
}

// @struct: Serialized form of one aligned line
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub line_number: usize,
    pub start: String,
    pub end: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub score: usize,
    pub text: String,
}

impl From<&AlignedLine> for MatchRecord {
    fn from(line: &AlignedLine) -> Self {
        Self {
            line_number: line.line_number,
            start: line.interval.format_start(),
            end: line.interval.format_end(),
            start_ms: line.interval.start_ms(),
            end_ms: line.interval.end_ms(),
            score: line.score,
            text: timecode::strip_terminator(&line.raw_line).to_string(),
        }
    }
}

/// Renders aligned lines in the configured format
#[derive(Debug, Clone)]
pub struct AlignmentWriter {
    format: OutputFormat,
    clips: ClipSettings,
}

impl AlignmentWriter {
    pub fn new(format: OutputFormat, clips: ClipSettings) -> Self {
        Self { format, clips }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render(&self, lines: &[AlignedLine]) -> Result<String, AppError> {
        match self.format {
            OutputFormat::Ranges => Ok(lines
                .iter()
                .map(|line| {
                    format!(
                        "{} {}\n",
                        line.interval,
                        timecode::strip_terminator(&line.raw_line)
                    )
                })
                .collect()),
            OutputFormat::Json => {
                let records: Vec<MatchRecord> = lines.iter().map(MatchRecord::from).collect();
                let mut json = serde_json::to_string_pretty(&records)
                    .map_err(|e| AppError::Unknown(format!("Failed to serialize matches: {}", e)))?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Ffmpeg => self.render_clips(
                lines
                    .iter()
                    .map(|line| (line.line_number, line.interval, line.raw_line.as_str())),
            ),
        }
    }

    /// Render ffmpeg commands for arbitrary `(number, interval, comment)` triples
    pub fn render_clips<'a, I>(&self, clips: I) -> Result<String, AppError>
    where
        I: IntoIterator<Item = (usize, TimeInterval, &'a str)>,
    {
        let mut out = String::new();
        for (number, interval, comment) in clips {
            out.push_str(&self.clips.ffmpeg_command(number, interval, comment)?);
            out.push('\n');
        }
        Ok(out)
    }
}
