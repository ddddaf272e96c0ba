use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::anyhow;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, SubtitleError};
use crate::file_utils::{self, FileManager};
use crate::sanitizer;
use crate::timecode::{self, TimeInterval};

// @const: UTF-8 byte order mark some editors put before the first line
const BYTE_ORDER_MARK: char = '\u{feff}';

// @module: Subtitle track parsing

/// What to do with a line that contains `-->` but is not a valid range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Abort the whole parse
    #[default]
    Strict,
    /// Log a warning and keep the line as body text
    Lenient,
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for TimestampPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(anyhow!("Invalid timestamp policy: {}", s)),
        }
    }
}

// @struct: One timed block of a subtitle track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    // @field: Time the block is shown
    pub interval: TimeInterval,

    // @field: Body lines, verbatim with terminators
    pub raw_lines: Vec<String>,
}

impl SubtitleRecord {
    pub fn new(interval: TimeInterval) -> Self {
        Self {
            interval,
            raw_lines: Vec::new(),
        }
    }

    /// Sanitized text of the whole block
    pub fn text(&self) -> String {
        sanitizer::collapse_lines(&self.raw_lines)
    }
}

impl fmt::Display for SubtitleRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.interval)?;
        for line in &self.raw_lines {
            writeln!(f, "{}", timecode::strip_terminator(line))?;
        }
        Ok(())
    }
}

/// Parser state threaded through the fold over input lines.
///
/// The timestamp line sits one line after the block's index number, so when a
/// new range is recognized the previous block has already swallowed that
/// number as its last body line. Closing a block therefore drops its last
/// line. The block still open at end of input is kept whole.
#[derive(Debug, Default)]
struct RecordAccumulator {
    records: Vec<SubtitleRecord>,
    current: Option<SubtitleRecord>,
    preamble_lines: usize,
}

impl RecordAccumulator {
    fn open(mut self, interval: TimeInterval) -> Self {
        if let Some(mut previous) = self.current.take() {
            previous.raw_lines.pop();
            self.records.push(previous);
        }
        self.current = Some(SubtitleRecord::new(interval));
        self
    }

    fn push_line(mut self, line: String) -> Self {
        match self.current.as_mut() {
            Some(record) => record.raw_lines.push(line),
            None => self.preamble_lines += 1,
        }
        self
    }

    fn finish(mut self) -> Vec<SubtitleRecord> {
        if self.preamble_lines > 0 {
            debug!("Ignored {} line(s) before the first timestamp", self.preamble_lines);
        }
        if let Some(last) = self.current.take() {
            self.records.push(last);
        }
        self.records
    }
}

/// Line-oriented SRT parser producing `SubtitleRecord`s
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleParser {
    policy: TimestampPolicy,
}

impl SubtitleParser {
    pub fn new(policy: TimestampPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// Parse already-split lines; each line should keep its terminator
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<Vec<SubtitleRecord>, SubtitleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_results(lines.into_iter().map(|line| Ok(line.into())))
    }

    /// Parse SRT content held in memory
    pub fn parse_str(&self, content: &str) -> Result<Vec<SubtitleRecord>, SubtitleError> {
        self.parse_lines(content.split_inclusive('\n'))
    }

    /// Parse SRT content from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<SubtitleRecord>, SubtitleError> {
        self.parse_results(file_utils::raw_lines(reader))
    }

    /// Parse an SRT file; the handle is released on every exit path
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SubtitleRecord>, AppError> {
        let reader = FileManager::open_reader(path.as_ref())?;
        let records = self.parse_reader(reader)?;
        debug!("Parsed {} subtitle record(s) from {:?}", records.len(), path.as_ref());
        Ok(records)
    }

    fn parse_results<I>(&self, lines: I) -> Result<Vec<SubtitleRecord>, SubtitleError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let accumulator = lines.enumerate().try_fold(
            RecordAccumulator::default(),
            |acc, (idx, line)| {
                let line = line.map_err(|source| SubtitleError::Read {
                    line_number: idx + 1,
                    source,
                })?;
                self.step(acc, idx + 1, line)
            },
        )?;
        Ok(accumulator.finish())
    }

    fn step(
        &self,
        acc: RecordAccumulator,
        line_number: usize,
        line: String,
    ) -> Result<RecordAccumulator, SubtitleError> {
        let line = if line_number == 1 && line.starts_with(BYTE_ORDER_MARK) {
            line[BYTE_ORDER_MARK.len_utf8()..].to_string()
        } else {
            line
        };

        match timecode::parse_timestamp_range(&line) {
            Ok(Some(interval)) => Ok(acc.open(interval)),
            Ok(None) => Ok(acc.push_line(line)),
            Err(e) => match self.policy {
                TimestampPolicy::Strict => {
                    error!("Subtitle line {} is not a valid timestamp range", line_number);
                    Err(e)
                }
                TimestampPolicy::Lenient => {
                    warn!("Treating subtitle line {} as text: {}", line_number, e);
                    Ok(acc.push_line(line))
                }
            },
        }
    }
}
