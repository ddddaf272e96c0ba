/*!
 * # srtalign - subtitle/transcript alignment
 *
 * A Rust library that finds where lines of a transcript are spoken by matching
 * them against the text of a subtitle track.
 *
 * ## Features
 *
 * - Parse SRT subtitle tracks into timed records
 * - Sanitize text so independently authored sources compare cleanly
 * - Index the whole track as one annotated buffer
 * - Locate each transcript line by best-window Hamming distance
 * - Emit time ranges, JSON records or ffmpeg clip commands
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: SRT timestamps and time intervals
 * - `subtitle_processor`: Subtitle track parsing
 * - `sanitizer`: Lossy text normalization
 * - `alignment`: Annotated index, matcher and per-line aligner
 * - `output`: Rendering of alignment results
 * - `file_utils`: File system operations
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod output;
pub mod sanitizer;
pub mod subtitle_processor;
pub mod timecode;

// Re-export main types for easier usage
pub use alignment::{AlignedLine, Aligner, AlignmentReport, AnnotatedText};
pub use app_config::Config;
pub use errors::{AppError, MatchError, SubtitleError};
pub use sanitizer::sanitize;
pub use subtitle_processor::{SubtitleParser, SubtitleRecord, TimestampPolicy};
pub use timecode::TimeInterval;
