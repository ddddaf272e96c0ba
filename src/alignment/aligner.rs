use log::{debug, warn};

use crate::alignment::annotated::AnnotatedText;
use crate::alignment::matcher;
use crate::errors::MatchError;
use crate::sanitizer;
use crate::timecode::TimeInterval;

// @module: Per-line alignment driver

// @struct: A query line resolved to a time interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedLine {
    // @field: 1-based position in the line source
    pub line_number: usize,

    // @field: Start of the first and end of the last subtitle the match touches
    pub interval: TimeInterval,

    // @field: Char offset of the matched window
    pub offset: usize,

    // @field: Hamming distance of the matched window
    pub score: usize,

    // @field: Length of the sanitized query, in chars
    pub query_len: usize,

    // @field: The line as read, unsanitized
    pub raw_line: String,
}

impl AlignedLine {
    /// Share of matched positions that agreed, in `0.0..=1.0`
    pub fn similarity(&self) -> f32 {
        if self.query_len == 0 {
            return 0.0;
        }
        1.0 - (self.score as f32 / self.query_len as f32)
    }
}

// @struct: A query line that could not be aligned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub raw_line: String,
    pub reason: MatchError,
}

/// Outcome of aligning a batch of lines
#[derive(Debug, Clone, Default)]
pub struct AlignmentReport {
    pub aligned: Vec<AlignedLine>,
    pub skipped: Vec<SkippedLine>,
}

impl AlignmentReport {
    pub fn total(&self) -> usize {
        self.aligned.len() + self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Matches query lines against a finished index
#[derive(Debug, Clone, Copy)]
pub struct Aligner<'a> {
    index: &'a AnnotatedText,
}

impl<'a> Aligner<'a> {
    pub fn new(index: &'a AnnotatedText) -> Self {
        Self { index }
    }

    /// Align a single raw line
    pub fn align_line(&self, line_number: usize, raw_line: &str) -> Result<AlignedLine, MatchError> {
        let query: Vec<char> = sanitizer::sanitize(raw_line).chars().collect();
        let best = matcher::best_match(&query, self.index.chars())?;
        let (open, close) = self.index.lookup_range(best.offset, best.offset + query.len())?;

        let interval = TimeInterval::new(open.time_ms, close.time_ms).map_err(|_| {
            MatchError::InvertedInterval {
                start_ms: open.time_ms,
                end_ms: close.time_ms,
            }
        })?;

        let aligned = AlignedLine {
            line_number,
            interval,
            offset: best.offset,
            score: best.score,
            query_len: query.len(),
            raw_line: raw_line.to_string(),
        };
        debug!(
            "Line {} matched at offset {} ({:.0}% similar): {}",
            line_number,
            best.offset,
            aligned.similarity() * 100.0,
            interval
        );
        Ok(aligned)
    }

    /// Align every line; failures are collected per line and never abort the batch
    pub fn align_all<I, S>(&self, lines: I) -> AlignmentReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = AlignmentReport::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            let raw_line = line.as_ref();
            match self.align_line(line_number, raw_line) {
                Ok(aligned) => report.aligned.push(aligned),
                Err(reason) => {
                    if reason == MatchError::EmptyQuery {
                        debug!("Skipping line {}: nothing to match", line_number);
                    } else {
                        warn!("Skipping line {}: {}", line_number, reason);
                    }
                    report.skipped.push(SkippedLine {
                        line_number,
                        raw_line: raw_line.to_string(),
                        reason,
                    });
                }
            }
        }

        report
    }
}
