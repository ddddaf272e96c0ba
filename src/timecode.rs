/*!
 * SRT timecodes and time intervals.
 *
 * Timestamps use the `HH:MM:SS,mmm` convention. Each field is an arbitrary
 * non-negative integer: `00:00:75,000` is accepted and means 75 seconds, and
 * hours are not bounded to two digits.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: Range delimiter between start and end
pub const RANGE_DELIMITER: &str = "-->";

// @const: Marker separating a range from its comment in annotated range lines
pub const COMMENT_MARKER: char = '¶';

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

// @const: Single SRT timestamp
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d+):(\d+),(\d+)$").expect("timestamp regex is valid")
});

/// Closed time interval with millisecond resolution, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeInterval {
    start_ms: u64,
    end_ms: u64,
}

impl TimeInterval {
    /// Create an interval, rejecting ranges that end before they start
    pub fn new(start_ms: u64, end_ms: u64) -> Result<Self, SubtitleError> {
        if end_ms < start_ms {
            return Err(SubtitleError::InvalidTimeRange { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Widen by `slop_ms` on both sides; the start saturates at zero
    pub fn with_slop(&self, slop_ms: u64) -> Self {
        Self {
            start_ms: self.start_ms.saturating_sub(slop_ms),
            end_ms: self.end_ms.saturating_add(slop_ms),
        }
    }

    pub fn format_start(&self) -> String {
        format_timestamp(self.start_ms)
    }

    pub fn format_end(&self) -> String {
        format_timestamp(self.end_ms)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.format_start(), RANGE_DELIMITER, self.format_end())
    }
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
pub fn parse_timestamp(value: &str) -> Result<u64, SubtitleError> {
    let value = value.trim();
    let caps = TIMESTAMP_REGEX.captures(value).ok_or_else(|| SubtitleError::MalformedTimestamp {
        value: value.to_string(),
        reason: "expected HH:MM:SS,mmm".to_string(),
    })?;

    let field = |idx: usize| -> Result<u64, SubtitleError> {
        caps[idx].parse::<u64>().map_err(|e| SubtitleError::MalformedTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|total| total.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|total| total.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .and_then(|total| total.checked_add(millis))
        .ok_or_else(|| SubtitleError::MalformedTimestamp {
            value: value.to_string(),
            reason: "value out of range".to_string(),
        })
}

/// Format milliseconds as a canonical, zero-padded SRT timestamp
pub fn format_timestamp(ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format milliseconds the way ffmpeg's `-ss`/`-to` options expect
pub fn format_ffmpeg_timestamp(ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_ms(ms);
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

fn split_ms(ms: u64) -> (u64, u64, u64, u64) {
    (
        ms / MS_PER_HOUR,
        (ms % MS_PER_HOUR) / MS_PER_MINUTE,
        (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        ms % MS_PER_SECOND,
    )
}

/// Parse a `START --> END` line.
///
/// Text following the end timestamp, separated by whitespace, is ignored.
/// Returns `Ok(None)` when the line carries no range delimiter at all, so the
/// caller can treat it as body text without inspecting an error.
pub fn parse_timestamp_range(line: &str) -> Result<Option<TimeInterval>, SubtitleError> {
    if !line.contains(RANGE_DELIMITER) {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(RANGE_DELIMITER).map(str::trim).collect();
    if parts.len() != 2 || parts.iter().any(|part| part.is_empty()) {
        return Err(SubtitleError::UnexpectedLineShape {
            line: strip_terminator(line).to_string(),
        });
    }

    // Anything after the end timestamp (e.g. `X1:100 X2:200` positions) is ignored
    let end_token = parts[1].split_whitespace().next().unwrap_or(parts[1]);

    let start = parse_timestamp(parts[0])?;
    let end = parse_timestamp(end_token)?;
    TimeInterval::new(start, end).map(Some)
}

/// Parse a `START --> END [¶] comment` line into its interval and comment
pub fn parse_annotated_range(line: &str) -> Result<(TimeInterval, String), SubtitleError> {
    let body = strip_terminator(line);
    let shape_error = || SubtitleError::UnexpectedLineShape {
        line: body.to_string(),
    };

    let (start_part, rest) = body.split_once(RANGE_DELIMITER).ok_or_else(shape_error)?;
    let start_part = start_part.trim();
    let rest = rest.trim_start();
    let (end_part, comment) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));

    if start_part.is_empty() || end_part.is_empty() {
        return Err(shape_error());
    }

    let comment = comment.trim_start();
    let comment = comment
        .strip_prefix(COMMENT_MARKER)
        .map(str::trim_start)
        .unwrap_or(comment);

    let interval = TimeInterval::new(parse_timestamp(start_part)?, parse_timestamp(end_part)?)?;
    Ok((interval, comment.to_string()))
}

/// Drop a trailing `\n` or `\r\n`
pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
