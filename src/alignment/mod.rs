/*!
 * Alignment of transcript lines against a subtitle track.
 *
 * The track's sanitized text is concatenated into one annotated buffer that
 * remembers which offsets came from which subtitle. Each query line is then
 * slid across the buffer to find its best equal-length window, and the window
 * is mapped back to a time interval.
 *
 * - `annotated`: the buffer and its OPEN/CLOSE spans
 * - `matcher`: Hamming-distance window scoring
 * - `aligner`: per-line driver that collects matches and skipped lines
 *
 * Building the index needs `&mut AnnotatedText`; matching only borrows it
 * shared, so the build phase is finished before the first query runs.
 */

pub mod aligner;
pub mod annotated;
pub mod matcher;

// Re-export main types
pub use aligner::{AlignedLine, Aligner, AlignmentReport, SkippedLine};
pub use annotated::{AnnotatedText, Span, SpanKind};
pub use matcher::{BestMatch, best_match, match_score};
