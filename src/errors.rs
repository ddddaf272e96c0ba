/*!
 * Error types for the srtalign application.
 *
 * Subtitle errors are fatal for a run: no alignment is attempted against a
 * malformed track. Match errors belong to a single query line and are
 * reported per line while the rest of the batch continues.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing a subtitle track
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp half did not parse as `HH:MM:SS,mmm`
    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp {
        /// The offending text
        value: String,
        /// What went wrong
        reason: String,
    },

    /// A line containing `-->` did not split into exactly two non-empty halves
    #[error("Line not in expected format START --> END: {line}")]
    UnexpectedLineShape {
        /// The offending line, without its terminator
        line: String,
    },

    /// The range ends before it starts
    #[error("Invalid time range: end time {end_ms} < start time {start_ms}")]
    InvalidTimeRange { start_ms: u64, end_ms: u64 },

    /// The underlying stream failed mid-read
    #[error("Failed to read subtitle line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while matching one query line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Nothing left to match once the line is sanitized
    #[error("Query is empty after sanitizing")]
    EmptyQuery,

    /// The query cannot fit anywhere in the indexed text
    #[error("Query of {query_len} chars is longer than the indexed text ({text_len} chars)")]
    QueryTooLong { query_len: usize, text_len: usize },

    /// Scoring requires equal-length inputs
    #[error("Cannot score strings of different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// No span pair encloses the matched offsets
    #[error("No subtitle spans enclose offsets {start}..{end}")]
    NoEnclosingSpan { start: usize, end: usize },

    /// The enclosing spans carry times out of order
    #[error("Matched spans give an inverted interval: {start_ms} > {end_ms}")]
    InvertedInterval { start_ms: u64, end_ms: u64 },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// A subtitle or line source could not be opened or read
    #[error("Cannot access {path:?}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Wrap an I/O failure on `path`
    pub fn unavailable<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }
}
